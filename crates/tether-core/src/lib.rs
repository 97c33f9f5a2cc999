//! # tether-core
//!
//! Core types shared across all tether crates.
//!
//! This crate provides:
//! - Version and Constraint types implementing semver precedence and
//!   constraint matching
//! - InstalledPackage and DependencySpec types describing the plugin graph
//! - TetherError enum for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Version, Constraint, InstalledPackage, etc.)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{TetherError, TetherResult};
pub use types::{
    Comparator, Constraint, DependencySpec, Identifier, InstalledPackage, Op, Version,
    VersionError,
};
