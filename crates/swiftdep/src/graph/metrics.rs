//! Coupling metrics over a dependency graph.

use super::dependency_graph::DependencyGraph;
use super::types::is_module;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many entries each ranking keeps.
pub const TOP_N: usize = 10;

/// Summary of afferent/efferent coupling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouplingMetrics {
    /// Nodes with at least one outgoing edge
    pub total_files: usize,
    /// Distinct `(source, target)` edges
    pub total_edges: usize,
    /// Mean out-degree over `total_files` (0 for an empty graph)
    pub avg_dependencies: f64,
    /// Files with the most distinct dependents, highest first
    pub most_depended_on: Vec<(String, usize)>,
    /// Files with the most outgoing edges, highest first
    pub most_dependencies: Vec<(String, usize)>,
}

/// Outgoing edge count per source node. Module targets count.
pub fn efferent_coupling(graph: &DependencyGraph) -> BTreeMap<&str, usize> {
    graph
        .sources()
        .map(|source| (source, graph.neighbors(source).count()))
        .collect()
}

/// Number of distinct sources pointing at each file. Module nodes are not scored.
pub fn afferent_coupling(graph: &DependencyGraph) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for (_, target, _) in graph.edges() {
        if !is_module(target) {
            *counts.entry(target).or_insert(0) += 1;
        }
    }
    counts
}

/// Compute totals, mean out-degree and the top-[`TOP_N`] coupling rankings.
///
/// Ties are broken by node name so the report is stable.
pub fn coupling_metrics(graph: &DependencyGraph) -> CouplingMetrics {
    let total_files = graph.source_count();
    let total_edges = graph.edge_count();
    let avg_dependencies = if total_files > 0 {
        total_edges as f64 / total_files as f64
    } else {
        0.0
    };

    CouplingMetrics {
        total_files,
        total_edges,
        avg_dependencies,
        most_depended_on: top_n(afferent_coupling(graph)),
        most_dependencies: top_n(efferent_coupling(graph)),
    }
}

fn top_n(counts: BTreeMap<&str, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // BTreeMap order is by name; a stable sort keeps it for equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(TOP_N)
        .map(|(node, count)| (node.to_string(), count))
        .collect()
}
