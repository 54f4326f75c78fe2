//! The file-level dependency graph.

use super::algorithms;
use super::metrics::{self, CouplingMetrics};
use crate::error::{GraphError, Result};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Labels attached to a single `source -> target` edge, deduplicated and sorted.
pub type LabelSet = BTreeSet<String>;

/// Directed, labelled dependency graph between files and external modules.
///
/// An edge `A -> B` records that `A` uses or imports something attributable to `B`;
/// every discovered cause is kept as a label on that one edge. Two invariants are
/// enforced on insertion:
///
/// - no self-loops: a file never depends on itself
/// - every edge carries at least one label
///
/// Ordered maps keep iteration, serialization and every analysis deterministic.
/// Serialized form is the plain adjacency mapping
/// `{ source: { target: [label, ...] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    adjacency: BTreeMap<String, BTreeMap<String, LabelSet>>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `label` as a cause of the edge `source -> target`.
    ///
    /// Returns `false` (and records nothing) for self-loops and empty labels.
    /// Adding a label that is already present is a no-op that still returns `true`.
    pub fn add_edge(&mut self, source: &str, target: &str, label: impl Into<String>) -> bool {
        if source == target {
            trace!("Suppressing self-loop on {source}");
            return false;
        }
        let label = label.into();
        if label.is_empty() {
            trace!("Ignoring unlabelled edge {source} -> {target}");
            return false;
        }

        self.adjacency
            .entry(source.to_string())
            .or_default()
            .entry(target.to_string())
            .or_default()
            .insert(label);
        true
    }

    /// Whether `node` appears anywhere in the graph, as a source or as a target.
    pub fn contains_node(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
            || self
                .adjacency
                .values()
                .any(|targets| targets.contains_key(node))
    }

    /// Whether the edge `source -> target` exists.
    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.labels(source, target).is_some()
    }

    /// Labels on the edge `source -> target`, if it exists.
    pub fn labels(&self, source: &str, target: &str) -> Option<&LabelSet> {
        self.adjacency.get(source)?.get(target)
    }

    /// Immediate targets of `node` together with their labels.
    ///
    /// Nodes without outgoing edges (including unknown nodes) yield `None`.
    pub fn direct_dependencies(&self, node: &str) -> Option<&BTreeMap<String, LabelSet>> {
        self.adjacency.get(node)
    }

    /// Immediate targets of `node`, in sorted order.
    pub fn neighbors<'g>(&'g self, node: &str) -> impl Iterator<Item = &'g str> + 'g {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|targets| targets.keys().map(String::as_str))
    }

    /// Nodes with at least one outgoing edge, in sorted order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// Every node appearing in the graph (sources and targets), sorted.
    pub fn nodes(&self) -> BTreeSet<&str> {
        let mut nodes: BTreeSet<&str> = self.sources().collect();
        for targets in self.adjacency.values() {
            nodes.extend(targets.keys().map(String::as_str));
        }
        nodes
    }

    /// Every edge as `(source, target, labels)`, ordered by source then target.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &LabelSet)> {
        self.adjacency.iter().flat_map(|(source, targets)| {
            targets
                .iter()
                .map(move |(target, labels)| (source.as_str(), target.as_str(), labels))
        })
    }

    /// Number of nodes with outgoing edges.
    pub fn source_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct `(source, target)` edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// True when no edge has been recorded.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Verify the construction invariants.
    ///
    /// Graphs built through [`add_edge`](Self::add_edge) always pass; graphs
    /// deserialized from elsewhere may not.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidOperation`] naming the first offending edge.
    pub fn check_invariants(&self) -> Result<()> {
        for (source, target, labels) in self.edges() {
            if source == target {
                return Err(GraphError::InvalidOperation {
                    message: format!("self-loop on {source}"),
                });
            }
            if labels.is_empty() || labels.iter().any(String::is_empty) {
                return Err(GraphError::InvalidOperation {
                    message: format!("edge {source} -> {target} has an empty label"),
                });
            }
        }
        Ok(())
    }

    /// Detect dependency cycles. See [`algorithms::find_cycles`].
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        algorithms::find_cycles(self)
    }

    /// Enumerate simple paths between two nodes. See [`algorithms::find_all_paths`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if either endpoint is not in the graph.
    pub fn find_all_paths(
        &self,
        start: &str,
        end: &str,
        max_depth: Option<usize>,
    ) -> Result<Vec<Vec<String>>> {
        algorithms::find_all_paths(self, start, end, max_depth)
    }

    /// Everything reachable from `start`. See [`algorithms::transitive_closure`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `start` is not in the graph.
    pub fn transitive_closure(&self, start: &str, include_modules: bool) -> Result<Vec<String>> {
        algorithms::transitive_closure(self, start, include_modules)
    }

    /// Project files the graph never mentions. See [`algorithms::find_orphan_files`].
    pub fn find_orphan_files<I, S>(&self, files: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        algorithms::find_orphan_files(self, files)
    }

    /// Afferent/efferent coupling report. See [`metrics::coupling_metrics`].
    pub fn coupling_metrics(&self) -> CouplingMetrics {
        metrics::coupling_metrics(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_accumulates_labels() {
        let mut graph = DependencyGraph::new();
        assert!(graph.add_edge("A.swift", "B.swift", "B[type]"));
        assert!(graph.add_edge("A.swift", "B.swift", "B.make[call]"));
        assert!(graph.add_edge("A.swift", "B.swift", "B[type]"));

        assert_eq!(graph.edge_count(), 1);
        let labels: Vec<&str> = graph
            .labels("A.swift", "B.swift")
            .unwrap()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(labels, vec!["B.make[call]", "B[type]"]);
    }

    #[test]
    fn test_self_loop_is_rejected() {
        let mut graph = DependencyGraph::new();
        assert!(!graph.add_edge("A.m", "A.m", "A[type]"));
        assert!(graph.is_empty());
        assert!(!graph.contains_node("A.m"));
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let mut graph = DependencyGraph::new();
        assert!(!graph.add_edge("A.m", "B.h", ""));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_nodes_include_targets() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("A.m", "B.h", "<import>");
        graph.add_edge("A.m", "@module:UIKit", "<module-import>");

        let nodes: Vec<&str> = graph.nodes().into_iter().collect();
        assert_eq!(nodes, vec!["@module:UIKit", "A.m", "B.h"]);
        assert!(graph.contains_node("B.h"));
        assert_eq!(graph.source_count(), 1);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_serialized_shape_is_adjacency_mapping() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("A.swift", "B.swift", "B[type]");
        graph.add_edge("A.swift", "B.swift", "B.run[call]");

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "A.swift": { "B.swift": ["B.run[call]", "B[type]"] } })
        );

        let back: DependencyGraph = serde_json::from_value(json).unwrap();
        assert_eq!(back, graph);
    }

    #[test]
    fn test_check_invariants_flags_loaded_self_loop() {
        let graph: DependencyGraph =
            serde_json::from_str(r#"{ "A.m": { "A.m": ["A[type]"] } }"#).unwrap();
        assert!(graph.check_invariants().is_err());

        let graph: DependencyGraph =
            serde_json::from_str(r#"{ "A.m": { "B.m": [] } }"#).unwrap();
        assert!(graph.check_invariants().is_err());
    }

    #[test]
    fn test_direct_dependencies() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("A.swift", "B.swift", "B[type]");
        graph.add_edge("A.swift", "module:Foundation", "<module-import>");

        let deps = graph.direct_dependencies("A.swift").unwrap();
        assert_eq!(deps.len(), 2);
        assert!(graph.direct_dependencies("B.swift").is_none());
    }
}
