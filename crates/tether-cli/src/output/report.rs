//! Rendering of resolution reports as text and JSON.
//!
//! Renderers build strings; printing is left to [`super::OutputHandler`].

use std::fmt::Write;

use indexmap::IndexMap;
use serde::Serialize;

use tether_registry::InstalledRegistry;
use tether_resolver::{Action, DependencyGraph, ResolutionReport, VersionMismatch};

use super::colors::ColorSupport;

/// Command an operator runs to carry out `action`
pub fn command_line(action: &Action) -> String {
    match action {
        Action::AddOrigin { source } => format!("/plugin marketplace add {}", source),
        Action::Install { .. } => format!("/plugin install {}", action.target()),
        Action::Update { .. } => format!("/plugin update {}", action.target()),
    }
}

fn command_lines<'a>(actions: impl IntoIterator<Item = &'a Action>) -> Vec<String> {
    actions.into_iter().map(command_line).collect()
}

fn status(report: &ResolutionReport, name: &str, colors: &ColorSupport) -> String {
    if report.is_installed(name) {
        "installed".to_string()
    } else {
        colors.red("MISSING")
    }
}

/// Dependency tree with sorted package names
pub fn render_tree(report: &ResolutionReport, colors: &ColorSupport) -> String {
    let mut out = String::new();

    if !report.has_dependencies() {
        out.push_str("No dependencies declared by any installed plugin.\n");
        return out;
    }

    out.push_str("Dependency tree:\n");
    let mut names: Vec<&String> = report.tree.keys().collect();
    names.sort();

    for name in names {
        let dependencies = &report.tree[name];
        if dependencies.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  {} ({})", colors.bold(name), status(report, name, colors));
        for (i, dependency) in dependencies.iter().enumerate() {
            let connector = if i + 1 == dependencies.len() { "└── " } else { "├── " };
            let _ = writeln!(
                out,
                "    {}{} ({})",
                connector,
                dependency,
                status(report, dependency, colors)
            );
        }
    }
    out
}

/// Cycle warning block, empty when there are no cycles
pub fn render_cycles(report: &ResolutionReport, colors: &ColorSupport) -> String {
    let mut out = String::new();
    if report.cycles.is_empty() {
        return out;
    }

    let _ = writeln!(
        out,
        "\n{} {} dependency cycle(s) detected:",
        colors.yellow("Warning:"),
        report.cycles.len()
    );
    for cycle in &report.cycles {
        let _ = writeln!(out, "  {}", cycle);
    }
    out
}

fn render_mismatch(mismatch: &VersionMismatch) -> String {
    format!(
        "  {} requires {} {}: {}",
        mismatch.package, mismatch.dependency, mismatch.constraint, mismatch.reason
    )
}

/// Full human report: installed packages, tree, problems and fixes
pub fn render_resolve(
    report: &ResolutionReport,
    installed: &InstalledRegistry,
    colors: &ColorSupport,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Installed plugins: {}", installed.len());
    let mut packages: Vec<_> = installed.iter().collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    for package in packages {
        let _ = writeln!(out, "  {} v{} ({})", package.name, package.version, package.origin);
    }

    out.push('\n');
    out.push_str(&render_tree(report, colors));
    out.push_str(&render_cycles(report, colors));

    if !report.unreadable_manifests.is_empty() {
        let _ = writeln!(
            out,
            "\n{} could not read manifest of: {}",
            colors.yellow("Warning:"),
            report.unreadable_manifests.join(", ")
        );
    }

    if !report.mismatches.is_empty() {
        let _ = writeln!(out, "\nVersion mismatches: {}", report.mismatches.len());
        for mismatch in &report.mismatches {
            out.push_str(&render_mismatch(mismatch));
            out.push('\n');
        }
    }

    if !report.missing.is_empty() {
        let _ = writeln!(out, "\nMissing dependencies: {}", report.missing.len());
        if !report.plan.add_origins.is_empty() {
            out.push_str("\nFirst, add missing marketplaces:\n");
            for line in command_lines(&report.plan.add_origins) {
                let _ = writeln!(out, "  {}", line);
            }
        }
        out.push_str("\nThen install missing plugins:\n");
        for line in command_lines(&report.plan.installs) {
            let _ = writeln!(out, "  {}", line);
        }
    }

    if !report.plan.updates.is_empty() {
        out.push_str("\nUpdate mismatched plugins:\n");
        for line in command_lines(&report.plan.updates) {
            let _ = writeln!(out, "  {}", line);
        }
    }

    if report.missing.is_empty() && report.mismatches.is_empty() {
        let _ = writeln!(out, "\n{}", colors.green("All dependencies satisfied."));
    }
    out
}

/// Machine-readable report
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub installed: &'a IndexMap<String, String>,
    pub tree: &'a IndexMap<String, Vec<String>>,
    pub missing: Vec<&'a str>,
    pub mismatches: &'a [VersionMismatch],
    pub cycles: Vec<String>,
    /// Dependency-first walk order; absent when cycles prevent one
    pub order: Option<Vec<String>>,
    pub unreadable_manifests: &'a [String],
    pub marketplace_commands: Vec<String>,
    pub install_commands: Vec<String>,
    pub update_commands: Vec<String>,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a ResolutionReport) -> Self {
        Self {
            installed: &report.installed,
            tree: &report.tree,
            missing: report.missing.keys().map(String::as_str).collect(),
            mismatches: &report.mismatches,
            cycles: report.cycles.iter().map(ToString::to_string).collect(),
            order: DependencyGraph::from_report(report).walk_order().ok(),
            unreadable_manifests: &report.unreadable_manifests,
            marketplace_commands: command_lines(&report.plan.add_origins),
            install_commands: command_lines(&report.plan.installs),
            update_commands: command_lines(&report.plan.updates),
        }
    }
}

/// Pretty-printed JSON report with a trailing newline
pub fn render_json(report: &ResolutionReport) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(&JsonReport::new(report))?;
    text.push('\n');
    Ok(text)
}
