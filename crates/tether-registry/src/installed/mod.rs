//! Installed-plugin registry loading
//!
//! The registry file maps `name@origin` keys to one or more install
//! records. The resolver only needs one record per plugin name, so the file
//! is flattened on load: the last record for a name wins, and registry
//! order is kept for everything else.

use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tether_core::types::InstalledPackage;
use tracing::{debug, warn};

use crate::{load_json, RegistryResult};

/// On-disk layout of the installed registry file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstalledFile {
    /// `name@origin` -> install records
    #[serde(default)]
    pub plugins: IndexMap<String, Vec<InstallRecord>>,
}

/// A single install of a plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallRecord {
    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub install_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
}

/// Installed plugins keyed by name, in registry order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstalledRegistry {
    packages: IndexMap<String, InstalledPackage>,
}

impl InstalledRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and flatten the registry file. A missing file is an empty registry.
    pub fn load(path: &Utf8Path) -> RegistryResult<Self> {
        match load_json::<InstalledFile>(path)? {
            Some(file) => {
                let registry = Self::from_file(file);
                debug!("Loaded {} installed plugins from {}", registry.len(), path);
                Ok(registry)
            },
            None => {
                debug!("No installed registry at {}", path);
                Ok(Self::new())
            },
        }
    }

    /// Flatten registry file contents into one package per name
    pub fn from_file(file: InstalledFile) -> Self {
        let mut registry = Self::new();

        for (key, records) in file.plugins {
            let Some((name, origin)) = key.split_once('@') else {
                warn!("Skipping registry key without origin: {}", key);
                continue;
            };

            for record in records {
                registry.insert(InstalledPackage {
                    name: name.to_string(),
                    origin: origin.to_string(),
                    version: record.version,
                    install_path: record.install_path,
                    scope: record.scope,
                    project_path: record.project_path,
                });
            }
        }

        registry
    }

    /// Insert or replace a package, keeping its first-seen position
    pub fn insert(&mut self, package: InstalledPackage) {
        self.packages.insert(package.name.clone(), package);
    }

    /// Look up a package by name
    pub fn get(&self, name: &str) -> Option<&InstalledPackage> {
        self.packages.get(name)
    }

    /// Check if a package is installed
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Package names in registry order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Packages in registry order
    pub fn iter(&self) -> impl Iterator<Item = &InstalledPackage> {
        self.packages.values()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl FromIterator<InstalledPackage> for InstalledRegistry {
    fn from_iter<I: IntoIterator<Item = InstalledPackage>>(iter: I) -> Self {
        let mut registry = Self::new();
        for package in iter {
            registry.insert(package);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    const REGISTRY: &str = r#"{
        "version": 2,
        "plugins": {
            "formatter@tools": [
                {"version": "1.0.0", "installPath": "/p/formatter-1"},
                {"version": "1.1.0", "installPath": "/p/formatter-2", "scope": "user"}
            ],
            "linter@community": [
                {"version": "0.3.0", "installPath": "/p/linter", "scope": "project", "projectPath": "/work"}
            ],
            "broken-key": [
                {"version": "9.9.9", "installPath": "/p/broken"}
            ],
            "scoped@org@mirror": [
                {"version": "2.0.0"}
            ]
        }
    }"#;

    fn parse(content: &str) -> InstalledRegistry {
        InstalledRegistry::from_file(serde_json::from_str(content).unwrap())
    }

    #[test]
    fn test_flatten_last_record_wins() {
        let registry = parse(REGISTRY);
        let formatter = registry.get("formatter").unwrap();

        assert_eq!(formatter.origin, "tools");
        assert_eq!(formatter.version, "1.1.0");
        assert_eq!(formatter.install_path, "/p/formatter-2");
        assert_eq!(formatter.scope.as_deref(), Some("user"));
    }

    #[test]
    fn test_keys_without_origin_skipped() {
        let registry = parse(REGISTRY);
        assert!(!registry.contains("broken-key"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_key_split_at_first_at_sign() {
        let registry = parse(REGISTRY);
        let scoped = registry.get("scoped").unwrap();
        assert_eq!(scoped.origin, "org@mirror");
        assert_eq!(scoped.install_path, "");
    }

    #[test]
    fn test_registry_order_preserved() {
        let registry = parse(REGISTRY);
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["formatter", "linter", "scoped"]);

        let linter = registry.get("linter").unwrap();
        assert_eq!(linter.project_path.as_deref(), Some("/work"));
    }

    #[test]
    fn test_missing_plugins_field() {
        let registry = parse("{}");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("installed_plugins.json")).unwrap();

        let registry = InstalledRegistry::load(&path).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("installed_plugins.json")).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let err = InstalledRegistry::load(&path).unwrap_err();
        assert!(err.to_string().contains("installed_plugins.json"));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("installed_plugins.json")).unwrap();
        std::fs::write(&path, REGISTRY).unwrap();

        let registry = InstalledRegistry::load(&path).unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_collect_from_packages() {
        let registry: InstalledRegistry = vec![
            InstalledPackage::new("a", "o", "1.0.0", "/a"),
            InstalledPackage::new("a", "o", "2.0.0", "/a2"),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().version, "2.0.0");
    }
}
