//! Installed package records.

use serde::{Deserialize, Serialize};

use super::version::{Version, VersionError};

/// A package as recorded in the installed registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledPackage {
    pub name: String,
    /// Origin tag the package was installed from
    pub origin: String,
    /// Installed version as recorded; not guaranteed to be valid semver
    pub version: String,
    /// Directory holding the package and its manifest
    pub install_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
}

impl InstalledPackage {
    /// Create a new installed package record
    pub fn new(
        name: impl Into<String>,
        origin: impl Into<String>,
        version: impl Into<String>,
        install_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            origin: origin.into(),
            version: version.into(),
            install_path: install_path.into(),
            scope: None,
            project_path: None,
        }
    }

    /// `name@origin` registry key
    pub fn key(&self) -> String {
        format!("{}@{}", self.name, self.origin)
    }

    /// Parse the recorded version
    pub fn parsed_version(&self) -> Result<Version, VersionError> {
        self.version.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_package_key() {
        let pkg = InstalledPackage::new("formatter", "tools", "1.2.0", "/plugins/formatter");
        assert_eq!(pkg.key(), "formatter@tools");
        assert_eq!(pkg.parsed_version().unwrap(), Version::new(1, 2, 0));
    }

    #[test]
    fn test_unparseable_version_is_kept_verbatim() {
        let pkg = InstalledPackage::new("legacy", "tools", "unknown", "/plugins/legacy");
        assert_eq!(pkg.version, "unknown");
        assert!(pkg.parsed_version().is_err());
    }
}
