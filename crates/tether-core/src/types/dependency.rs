//! Dependency specification types.
//!
//! Manifests may declare a dependency either as a bare origin tag or as a
//! full object. Both forms collapse into [`DependencySpec`] on ingestion.

use serde::{Deserialize, Serialize};

/// Dependency specification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawDependencySpec", rename_all = "camelCase")]
pub struct DependencySpec {
    /// Origin tag the dependency is installed from (may be empty)
    pub origin: String,
    /// Address used to register the origin when it is not known locally
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_locator: Option<String>,
    /// Version constraint expression; absent or blank accepts any version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_constraint: Option<String>,
}

/// Dependency specification as written in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawDependencySpec {
    /// Bare origin tag, shorthand for `{ "origin": tag }`
    OriginOnly(String),

    /// Detailed dependency specification
    Detailed {
        #[serde(default, alias = "marketplace")]
        origin: String,

        #[serde(default, rename = "sourceLocator", alias = "source")]
        source_locator: Option<String>,

        #[serde(default, rename = "versionConstraint", alias = "version")]
        version_constraint: Option<String>,
    },
}

impl From<RawDependencySpec> for DependencySpec {
    fn from(raw: RawDependencySpec) -> Self {
        match raw {
            RawDependencySpec::OriginOnly(origin) => Self::from_origin(origin),
            RawDependencySpec::Detailed {
                origin,
                source_locator,
                version_constraint,
            } => Self {
                origin,
                source_locator,
                version_constraint,
            },
        }
    }
}

impl DependencySpec {
    /// Create a spec that only names an origin
    pub fn from_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }

    /// Set the source locator
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_locator = Some(source.into());
        self
    }

    /// Set the version constraint
    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.version_constraint = Some(constraint.into());
        self
    }

    /// Origin tag, if non-empty
    pub fn origin(&self) -> Option<&str> {
        non_blank(Some(&self.origin))
    }

    /// Source locator, if non-empty
    pub fn source(&self) -> Option<&str> {
        non_blank(self.source_locator.as_deref())
    }

    /// Version constraint, if non-blank
    pub fn constraint(&self) -> Option<&str> {
        non_blank(self.version_constraint.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
