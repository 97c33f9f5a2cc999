//! Dependency resolution engine for tether
//!
//! This crate walks the dependency graph of installed plugins, classifying
//! every declared edge as satisfied, missing, version-mismatched or cyclic,
//! and collects the findings into a [`ResolutionReport`].

pub mod graph;
pub mod report;
pub mod semver;
pub mod walker;

// Re-export main types
pub use graph::DependencyGraph;
pub use report::{Action, Cycle, RemediationPlan, ResolutionReport, VersionMismatch};
pub use semver::{satisfies, Unsatisfied};
pub use walker::{resolve, Resolver};
