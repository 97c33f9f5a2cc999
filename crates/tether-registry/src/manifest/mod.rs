//! Plugin manifest reading
//!
//! Each installed plugin may ship a JSON manifest declaring its own name,
//! version and dependencies. The resolver reads manifests lazily through the
//! [`ManifestSource`] trait, at most once per plugin.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tether_core::error::TetherError;
use tether_core::types::{DependencySpec, InstalledPackage};

use crate::{load_json, RegistryResult};


/// Manifest location relative to a plugin's install path
pub const DEFAULT_MANIFEST_PATH: &str = ".claude-plugin/plugin.json";

/// Plugin manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Dependency name -> spec, in declaration order
    #[serde(default)]
    pub dependencies: IndexMap<String, DependencySpec>,
}

impl Manifest {
    /// Parse manifest JSON
    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Add a dependency (builder style)
    pub fn with_dependency(mut self, name: impl Into<String>, spec: DependencySpec) -> Self {
        self.dependencies.insert(name.into(), spec);
        self
    }
}

/// Supplies manifests for installed packages
pub trait ManifestSource {
    /// Load the manifest of `package`. `Ok(None)` means the package ships no
    /// manifest; `Err` means one exists but cannot be read or parsed.
    fn load(&self, package: &InstalledPackage) -> RegistryResult<Option<Manifest>>;
}

/// Reads manifests from each plugin's install directory
#[derive(Debug, Clone)]
pub struct FsManifestSource {
    manifest_path: Utf8PathBuf,
}

impl FsManifestSource {
    /// Create a source reading `<install_path>/<manifest_path>`
    pub fn new(manifest_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
        }
    }

    /// Path of the manifest for `package`
    pub fn manifest_file(&self, package: &InstalledPackage) -> Utf8PathBuf {
        Utf8Path::new(&package.install_path).join(&self.manifest_path)
    }
}

impl Default for FsManifestSource {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_PATH)
    }
}

impl ManifestSource for FsManifestSource {
    fn load(&self, package: &InstalledPackage) -> RegistryResult<Option<Manifest>> {
        load_json(&self.manifest_file(package))
    }
}

/// In-memory manifests keyed by package name
#[derive(Debug, Clone, Default)]
pub struct MemoryManifests {
    manifests: HashMap<String, Result<Manifest, String>>,
}

impl MemoryManifests {
    /// Create an empty manifest set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the manifest of `name`
    pub fn insert(&mut self, name: impl Into<String>, manifest: Manifest) {
        self.manifests.insert(name.into(), Ok(manifest));
    }

    /// Register a manifest that fails to load with `reason`
    pub fn insert_unreadable(&mut self, name: impl Into<String>, reason: impl Into<String>) {
        self.manifests.insert(name.into(), Err(reason.into()));
    }

    /// Builder shorthand: `name` depends on each `(dependency, spec)` in order
    pub fn with<'a>(
        mut self,
        name: &str,
        dependencies: impl IntoIterator<Item = (&'a str, DependencySpec)>,
    ) -> Self {
        let manifest = dependencies
            .into_iter()
            .fold(Manifest::default(), |m, (dep, spec)| m.with_dependency(dep, spec));
        self.insert(name, manifest);
        self
    }
}

impl ManifestSource for MemoryManifests {
    fn load(&self, package: &InstalledPackage) -> RegistryResult<Option<Manifest>> {
        match self.manifests.get(&package.name) {
            None => Ok(None),
            Some(Ok(manifest)) => Ok(Some(manifest.clone())),
            Some(Err(reason)) => Err(TetherError::JsonParse {
                file: format!("{} manifest", package.name),
                message: reason.clone(),
            }),
        }
    }
}
