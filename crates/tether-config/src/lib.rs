//! Configuration for tether
//!
//! Handles parsing and validation of `tether.toml` and layers it with
//! built-in defaults, environment variables and command-line flags into a
//! single [`ResolvedConfig`].

pub mod merge;
pub mod toml;

// Re-export main types
pub use crate::merge::{CliOverrides, ConfigLoader, ConfigSource, ResolvedConfig};
pub use crate::toml::{ColorMode, OutputSection, PathsSection, TetherToml};

use tether_core::error::TetherError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, TetherError>;
