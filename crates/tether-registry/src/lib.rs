//! Installed-plugin registry access for tether
//!
//! This crate reads the inputs the resolver works on: the persisted record
//! of installed plugins, the set of known origins, and each plugin's
//! manifest. All reads are synchronous and happen at most once per file.

pub mod installed;
pub mod manifest;
pub mod origins;

// Re-export main types
pub use installed::{InstallRecord, InstalledFile, InstalledRegistry};
pub use manifest::{FsManifestSource, Manifest, ManifestSource, MemoryManifests};
pub use origins::KnownOrigins;

use camino::Utf8Path;
use serde::de::DeserializeOwned;
use tether_core::error::TetherError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, TetherError>;

/// Read and deserialize a JSON file. A file that does not exist is `None`.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Utf8Path) -> RegistryResult<Option<T>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(TetherError::io(format!("Failed to read {}", path), e)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| TetherError::json(path.as_str(), e))
}
