//! Integration tests for graph analysis over hand-built graphs.

use swiftdep::export::{export_csv_edges, export_dot, export_json, export_mermaid};
use swiftdep::{DependencyGraph, FileBackend, GraphError, StorageBackend};
use tempfile::TempDir;

fn chain(nodes: &[&str]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for pair in nodes.windows(2) {
        graph.add_edge(pair[0], pair[1], format!("{}[type]", pair[1]));
    }
    graph
}

#[test]
fn test_six_level_chain_has_exactly_one_path() {
    let nodes = ["L0.swift", "L1.swift", "L2.swift", "L3.swift", "L4.swift", "L5.swift"];
    let graph = chain(&nodes);

    let paths = graph.find_all_paths("L0.swift", "L5.swift", None).unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].len(), 6);
    assert_eq!(paths[0], nodes.to_vec());

    // five edges needed, four allowed
    assert!(graph
        .find_all_paths("L0.swift", "L5.swift", Some(4))
        .unwrap()
        .is_empty());
}

#[test]
fn test_three_file_cycle_reported_once() {
    let mut graph = chain(&["A.m", "B.m", "C.m"]);
    graph.add_edge("C.m", "A.m", "A[type]");
    graph.add_edge("C.m", "A.m", "A.load[call]");

    let cycles = graph.find_cycles();
    assert_eq!(cycles.len(), 1);
    let cycle = &cycles[0];
    assert_eq!(cycle.first(), cycle.last());
    assert_eq!(cycle.len(), 4);
}

#[test]
fn test_closure_and_orphans() {
    let mut graph = chain(&["App.swift", "Service.swift", "Store.h"]);
    graph.add_edge("App.swift", "module:SwiftUI", "<module-import>");

    let closure = graph.transitive_closure("App.swift", false).unwrap();
    assert_eq!(closure, vec!["Service.swift", "Store.h"]);

    let all_files = ["App.swift", "Service.swift", "Store.h", "Store.m", "Unused.swift"];
    assert_eq!(graph.find_orphan_files(all_files), vec!["Store.m", "Unused.swift"]);
}

#[test]
fn test_queries_on_unknown_nodes_fail() {
    let graph = chain(&["A.swift", "B.swift"]);
    assert!(matches!(
        graph.transitive_closure("Missing.swift", false),
        Err(GraphError::NodeNotFound { .. })
    ));
    assert!(matches!(
        graph.find_all_paths("Missing.swift", "B.swift", None),
        Err(GraphError::NodeNotFound { .. })
    ));
}

#[test]
fn test_metrics_rank_hub_first() {
    let mut graph = DependencyGraph::new();
    for source in ["A.swift", "B.swift", "C.swift"] {
        graph.add_edge(source, "Hub.h", "Hub[type]");
    }
    graph.add_edge("A.swift", "B.swift", "B[type]");

    let metrics = graph.coupling_metrics();
    assert_eq!(metrics.total_files, 3);
    assert_eq!(metrics.total_edges, 4);
    assert_eq!(metrics.most_depended_on[0], ("Hub.h".to_string(), 3));
    assert_eq!(metrics.most_dependencies[0], ("A.swift".to_string(), 2));
}

#[test]
fn test_exports_mention_every_edge() {
    let mut graph = chain(&["A.swift", "B.m"]);
    graph.add_edge("B.m", "@module:UIKit", "<module-import>");

    let json = export_json(&graph).unwrap();
    assert!(json.contains("\"@module:UIKit\""));

    let dot = export_dot(&graph).unwrap();
    assert!(dot.contains("\"A.swift\" -> \"B.m\""));
    assert!(dot.contains("\"B.m\" -> \"@module:UIKit\""));

    let mermaid = export_mermaid(&graph).unwrap();
    assert_eq!(mermaid.matches("-->").count(), 2);

    let csv = export_csv_edges(&graph);
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn test_graph_survives_file_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let mut graph = chain(&["A.swift", "B.swift", "C.h"]);
    graph.add_edge("A.swift", "C.h", "C.shared[call]");

    {
        let mut store = FileBackend::open(temp_dir.path()).unwrap();
        let bytes = serde_json::to_vec(&graph).unwrap();
        store.put(b"graph:test", &bytes).unwrap();
        store.flush().unwrap();
    }

    let store = FileBackend::open(temp_dir.path()).unwrap();
    let bytes = store.get(b"graph:test").unwrap().unwrap();
    let loaded: DependencyGraph = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(loaded, graph);
    loaded.check_invariants().unwrap();
}
