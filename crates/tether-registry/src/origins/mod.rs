//! Known origins (registered plugin sources)
//!
//! Only presence matters to the resolver; the metadata attached to each
//! origin is kept opaque.

use camino::Utf8Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{load_json, RegistryResult};

/// Origin tag -> opaque origin metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnownOrigins {
    origins: IndexMap<String, serde_json::Value>,
}

impl KnownOrigins {
    /// Create an empty origin set
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the known-origins file. A missing file means no known origins.
    pub fn load(path: &Utf8Path) -> RegistryResult<Self> {
        let origins = load_json::<Self>(path)?.unwrap_or_default();
        debug!("Loaded {} known origins from {}", origins.len(), path);
        Ok(origins)
    }

    /// Register an origin
    pub fn insert(&mut self, tag: impl Into<String>, metadata: serde_json::Value) {
        self.origins.insert(tag.into(), metadata);
    }

    /// Check if an origin tag is known
    pub fn contains(&self, tag: &str) -> bool {
        self.origins.contains_key(tag)
    }

    /// Origin tags in file order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.origins.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KnownOrigins {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut origins = Self::new();
        for tag in iter {
            origins.insert(tag, serde_json::Value::Null);
        }
        origins
    }
}
