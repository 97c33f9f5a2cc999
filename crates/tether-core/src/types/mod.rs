//! Core data types for tether.
//!
//! This module provides the fundamental types used throughout tether:
//! - Version types for semantic versioning
//! - Constraint types for version requirements
//! - Installed package records
//! - Dependency specifications

pub mod constraint;
pub mod dependency;
pub mod package;
pub mod version;

// Re-export all public types
pub use constraint::{Comparator, Constraint, Op};
pub use dependency::{DependencySpec, RawDependencySpec};
pub use package::InstalledPackage;
pub use version::{Identifier, Version, VersionError};
