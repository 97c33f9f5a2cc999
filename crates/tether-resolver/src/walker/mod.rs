//! Depth-first walk over installed packages
//!
//! Every installed package is a root. Each is expanded at most once; the
//! traversal uses an explicit frame stack so depth is bounded by memory,
//! not by the call stack. A package is `InProgress` exactly while its frame
//! sits on the stack, which makes cycle paths a slice of the stack.

use std::collections::HashMap;

use tracing::{debug, warn};

use tether_core::types::{DependencySpec, InstalledPackage};
use tether_registry::{InstalledRegistry, KnownOrigins, ManifestSource};

use crate::report::{Action, Cycle, ResolutionReport, VersionMismatch};
use crate::semver::satisfies;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// A package being expanded, with its not-yet-visited dependencies
struct Frame {
    name: String,
    pending: std::vec::IntoIter<(String, DependencySpec)>,
}

/// Single-use resolver over borrowed registries
pub struct Resolver<'a, M: ManifestSource + ?Sized> {
    installed: &'a InstalledRegistry,
    origins: &'a KnownOrigins,
    manifests: &'a M,
    state: HashMap<String, VisitState>,
    stack: Vec<Frame>,
    report: ResolutionReport,
}

/// Walk the installed graph and classify every dependency edge
pub fn resolve<M: ManifestSource + ?Sized>(
    installed: &InstalledRegistry,
    origins: &KnownOrigins,
    manifests: &M,
) -> ResolutionReport {
    Resolver::new(installed, origins, manifests).resolve()
}

impl<'a, M: ManifestSource + ?Sized> Resolver<'a, M> {
    pub fn new(installed: &'a InstalledRegistry, origins: &'a KnownOrigins, manifests: &'a M) -> Self {
        Self {
            installed,
            origins,
            manifests,
            state: HashMap::with_capacity(installed.len()),
            stack: Vec::new(),
            report: ResolutionReport::default(),
        }
    }

    /// Run the walk to completion and return the report
    pub fn resolve(mut self) -> ResolutionReport {
        let installed = self.installed;
        debug!("Resolving {} installed packages", installed.len());

        self.report.installed = installed
            .iter()
            .map(|package| (package.name.clone(), package.version.clone()))
            .collect();

        for name in installed.names() {
            self.walk(name);
        }

        debug!(
            "Resolution finished: {} missing, {} mismatched, {} cycles",
            self.report.missing.len(),
            self.report.mismatches.len(),
            self.report.cycles.len()
        );
        self.report
    }

    fn state_of(&self, name: &str) -> VisitState {
        self.state.get(name).copied().unwrap_or(VisitState::Unvisited)
    }

    fn walk(&mut self, root: &str) {
        self.enter(root);

        while let Some(frame) = self.stack.last_mut() {
            match frame.pending.next() {
                Some((dependency, spec)) => {
                    let package = frame.name.clone();
                    self.visit_edge(&package, dependency, spec);
                },
                None => {
                    if let Some(frame) = self.stack.pop() {
                        self.state.insert(frame.name, VisitState::Done);
                    }
                },
            }
        }
    }

    /// Push a frame for `name` unless it is done, on the stack, or not installed
    fn enter(&mut self, name: &str) {
        match self.state_of(name) {
            VisitState::Done => return,
            VisitState::InProgress => {
                self.record_cycle(name);
                return;
            },
            VisitState::Unvisited => {},
        }

        let installed = self.installed;
        let Some(package) = installed.get(name) else {
            return;
        };

        self.state.insert(name.to_string(), VisitState::InProgress);
        let dependencies = self.read_dependencies(package);
        self.report.tree.insert(
            name.to_string(),
            dependencies.iter().map(|(dep, _)| dep.clone()).collect(),
        );
        self.stack.push(Frame {
            name: name.to_string(),
            pending: dependencies.into_iter(),
        });
    }

    fn read_dependencies(&mut self, package: &InstalledPackage) -> Vec<(String, DependencySpec)> {
        match self.manifests.load(package) {
            Ok(Some(manifest)) => manifest.dependencies.into_iter().collect(),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Treating {} as dependency-free: {}", package.name, e);
                self.report.unreadable_manifests.push(package.name.clone());
                Vec::new()
            },
        }
    }

    fn visit_edge(&mut self, package: &str, dependency: String, spec: DependencySpec) {
        if dependency == package {
            debug!("Ignoring self-dependency of {}", package);
            return;
        }

        let installed = self.installed;
        let Some(target) = installed.get(&dependency) else {
            self.record_missing(dependency, spec);
            return;
        };

        if let Some(constraint) = spec.constraint() {
            if let Err(unsatisfied) = satisfies(&target.version, constraint) {
                debug!("{} -> {}: {}", package, dependency, unsatisfied);
                self.report.mismatches.push(VersionMismatch {
                    package: package.to_string(),
                    dependency: dependency.clone(),
                    installed_version: target.version.clone(),
                    constraint: constraint.to_string(),
                    reason: unsatisfied.to_string(),
                });
                self.report.plan.push(Action::Update {
                    name: dependency.clone(),
                    origin: target.origin.clone(),
                });
            }
        }

        self.enter(&dependency);
    }

    fn record_missing(&mut self, dependency: String, spec: DependencySpec) {
        debug!("Dependency {} is not installed", dependency);
        let origin = spec.origin().map(str::to_string);
        let source = spec.source().map(str::to_string);

        self.report.missing.entry(dependency.clone()).or_insert(spec);

        let Some(origin) = origin else {
            return;
        };
        if !self.origins.contains(&origin) {
            if let Some(source) = source {
                self.report.plan.push(Action::AddOrigin { source });
            }
        }
        self.report.plan.push(Action::Install {
            name: dependency,
            origin,
        });
    }

    fn record_cycle(&mut self, name: &str) {
        let Some(start) = self.stack.iter().position(|frame| frame.name == name) else {
            return;
        };

        let mut members: Vec<String> = self.stack[start..]
            .iter()
            .map(|frame| frame.name.clone())
            .collect();
        members.push(name.to_string());

        let cycle = Cycle(members);
        debug!("Cycle detected: {}", cycle);
        self.report.cycles.push(cycle);
    }
}
