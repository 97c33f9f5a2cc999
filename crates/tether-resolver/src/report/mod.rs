//! Resolution report and remediation plan
//!
//! The report is the only output of a resolution run and the exact contract
//! renderers consume. It is a plain value: building it never fails.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use tether_core::types::DependencySpec;

/// Result of walking the installed dependency graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    /// Installed package name -> recorded version, in registry order
    pub installed: IndexMap<String, String>,
    /// Package -> direct dependency names, in manifest order
    pub tree: IndexMap<String, Vec<String>>,
    /// Missing dependency -> first spec that declared it
    pub missing: IndexMap<String, DependencySpec>,
    pub mismatches: Vec<VersionMismatch>,
    pub cycles: Vec<Cycle>,
    /// Packages whose manifest exists but could not be read or parsed
    pub unreadable_manifests: Vec<String>,
    pub plan: RemediationPlan,
}

/// An installed dependency whose version violates a declared constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionMismatch {
    /// Package declaring the constraint
    pub package: String,
    pub dependency: String,
    pub installed_version: String,
    pub constraint: String,
    pub reason: String,
}

/// Dependency cycle; the first name is repeated as the last
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cycle(pub Vec<String>);

/// Suggested remediation step for an external actor to execute
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Register an origin from its source locator
    AddOrigin { source: String },
    /// Install a missing package from an origin
    Install { name: String, origin: String },
    /// Update an installed package whose version is rejected
    Update { name: String, origin: String },
}

/// Deduplicated actions grouped by kind, each in first-emitted order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemediationPlan {
    pub add_origins: IndexSet<Action>,
    pub installs: IndexSet<Action>,
    pub updates: IndexSet<Action>,
}

impl ResolutionReport {
    /// No missing dependencies, mismatches or cycles
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty() && self.mismatches.is_empty() && self.cycles.is_empty()
    }

    /// Whether any installed package declares at least one dependency
    pub fn has_dependencies(&self) -> bool {
        self.tree.values().any(|deps| !deps.is_empty())
    }

    pub fn is_installed(&self, name: &str) -> bool {
        self.installed.contains_key(name)
    }
}

impl Cycle {
    /// Package names along the cycle, first repeated as last
    pub fn members(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}

impl Action {
    /// Action verb
    pub fn verb(&self) -> &'static str {
        match self {
            Action::AddOrigin { .. } => "add-origin",
            Action::Install { .. } => "install",
            Action::Update { .. } => "update",
        }
    }

    /// `<source>` or `<name>@<origin>`
    pub fn target(&self) -> String {
        match self {
            Action::AddOrigin { source } => source.clone(),
            Action::Install { name, origin } | Action::Update { name, origin } => {
                format!("{}@{}", name, origin)
            },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb(), self.target())
    }
}

impl RemediationPlan {
    /// Record an action; returns false if it was already planned
    pub fn push(&mut self, action: Action) -> bool {
        match action {
            Action::AddOrigin { .. } => self.add_origins.insert(action),
            Action::Install { .. } => self.installs.insert(action),
            Action::Update { .. } => self.updates.insert(action),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.add_origins.is_empty() && self.installs.is_empty() && self.updates.is_empty()
    }

    /// All actions in execution order: origins, then installs, then updates
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.add_origins
            .iter()
            .chain(self.installs.iter())
            .chain(self.updates.iter())
    }
}
