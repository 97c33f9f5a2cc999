//! Dependency graph built from a resolution report
//!
//! The walker answers "what is wrong"; this graph answers "in what order".
//! Nodes are package names, installed or missing, and edges point from a
//! package to each of its dependencies, so a reversed topological sort
//! yields an order where every dependency precedes the packages requiring it.

use std::collections::{HashMap, VecDeque};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::report::{Cycle, ResolutionReport};

/// Directed graph over package names
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from a report's tree.
    ///
    /// Missing dependencies become leaf nodes; self-dependencies add no edge.
    pub fn from_report(report: &ResolutionReport) -> Self {
        let mut graph = Self::new();
        for name in report.installed.keys() {
            graph.add_package(name);
        }
        for (package, dependencies) in &report.tree {
            for dependency in dependencies {
                if dependency != package {
                    graph.add_dependency(package, dependency);
                }
            }
        }
        graph
    }

    /// Add a package node, returning the existing one if present
    pub fn add_package(&mut self, name: &str) -> NodeIndex {
        if let Some(index) = self.node_map.get(name) {
            return *index;
        }
        let index = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), index);
        index
    }

    /// Add an edge `from -> to`, creating either node as needed
    pub fn add_dependency(&mut self, from: &str, to: &str) {
        let from = self.add_package(from);
        let to = self.add_package(to);
        self.graph.update_edge(from, to, ());
    }

    pub fn package_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Direct dependencies of `name`
    pub fn dependencies_of(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Packages that directly depend on `name`
    pub fn dependents_of(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Incoming)
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<&str> {
        let Some(index) = self.node_map.get(name) else {
            return Vec::new();
        };
        let mut names: Vec<&str> = self
            .graph
            .neighbors_directed(*index, direction)
            .map(|n| self.graph[n].as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Dependency-first walk order, or a cycle blocking one
    pub fn walk_order(&self) -> Result<Vec<String>, Cycle> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order
                .into_iter()
                .rev()
                .map(|index| self.graph[index].clone())
                .collect()),
            Err(cycle) => Err(self.cycle_through(cycle.node_id())),
        }
    }

    /// Shortest closed path from `start` back to itself
    fn cycle_through(&self, start: NodeIndex) -> Cycle {
        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
                if next == start {
                    let mut path = vec![node];
                    let mut current = node;
                    while current != start {
                        match parent.get(&current) {
                            Some(&previous) => {
                                path.push(previous);
                                current = previous;
                            },
                            None => break,
                        }
                    }
                    path.reverse();
                    path.push(start);
                    return Cycle(path.into_iter().map(|i| self.graph[i].clone()).collect());
                }
                if !parent.contains_key(&next) {
                    parent.insert(next, node);
                    queue.push_back(next);
                }
            }
        }

        let name = self.graph[start].clone();
        Cycle(vec![name.clone(), name])
    }
}
