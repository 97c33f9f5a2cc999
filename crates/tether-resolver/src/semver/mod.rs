//! Constraint satisfaction on raw version strings
//!
//! Installed versions and manifest constraints arrive as untrusted text.
//! [`satisfies`] never fails hard: a malformed version or constraint is a
//! non-satisfaction with its own reason, distinct from a genuine violation.

use thiserror::Error;

use tether_core::types::{Comparator, Constraint, Version, VersionError};

/// Why a version does not satisfy a constraint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unsatisfied {
    /// The installed version string is not valid semver
    #[error("installed version '{input}' is not valid semver: {source}")]
    InvalidVersion {
        input: String,
        #[source]
        source: VersionError,
    },

    /// The constraint expression could not be parsed
    #[error("version constraint '{input}' is invalid: {source}")]
    InvalidConstraint {
        input: String,
        #[source]
        source: VersionError,
    },

    /// A comparator of the constraint rejected the version
    #[error("installed {version} does not satisfy {violated}{}", required_note(.constraint, .violated))]
    Violated {
        version: Version,
        violated: Comparator,
        constraint: String,
    },
}

impl Unsatisfied {
    /// Whether this is a parse failure rather than a real violation
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            Unsatisfied::InvalidVersion { .. } | Unsatisfied::InvalidConstraint { .. }
        )
    }
}

/// Names the written constraint when the violated bound came from desugaring
fn required_note(constraint: &str, violated: &Comparator) -> String {
    if constraint == violated.to_string() {
        String::new()
    } else {
        format!(" (required {})", constraint)
    }
}

/// Check `version` against `constraint`.
///
/// A blank constraint is always satisfied. Otherwise comparators are
/// evaluated in order and the first violated one is reported.
pub fn satisfies(version: &str, constraint: &str) -> Result<(), Unsatisfied> {
    let constraint = constraint.trim();
    if constraint.is_empty() {
        return Ok(());
    }

    let version: Version = version.parse().map_err(|source| Unsatisfied::InvalidVersion {
        input: version.to_string(),
        source,
    })?;

    let parsed = Constraint::parse(constraint).map_err(|source| Unsatisfied::InvalidConstraint {
        input: constraint.to_string(),
        source,
    })?;

    parsed.check(&version).map_err(|violated| Unsatisfied::Violated {
        version: version.clone(),
        violated: violated.clone(),
        constraint: constraint.to_string(),
    })
}
