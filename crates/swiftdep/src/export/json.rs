//! JSON export.

use crate::error::{GraphError, Result};
use crate::graph::DependencyGraph;
use serde_json::json;

/// Export the graph as its adjacency mapping, pretty-printed.
///
/// The output has the shape `{ "source": { "target": ["label", ...] } }` with
/// sources, targets and labels all sorted.
pub fn export_json(graph: &DependencyGraph) -> Result<String> {
    serde_json::to_string_pretty(graph)
        .map_err(|e| GraphError::serialization("Failed to serialize graph", Some(e)))
}

/// Export the result of an all-paths query together with the labels of every hop.
pub fn export_paths_json(
    graph: &DependencyGraph,
    source: &str,
    target: &str,
    paths: &[Vec<String>],
) -> Result<String> {
    let rendered: Vec<_> = paths
        .iter()
        .map(|path| {
            let hops: Vec<_> = path
                .windows(2)
                .map(|hop| {
                    json!({
                        "from": hop[0],
                        "to": hop[1],
                        "labels": graph.labels(&hop[0], &hop[1]),
                    })
                })
                .collect();
            json!({ "length": path.len(), "nodes": path, "hops": hops })
        })
        .collect();

    let result = json!({
        "source": source,
        "target": target,
        "path_count": paths.len(),
        "paths": rendered,
    });

    serde_json::to_string_pretty(&result)
        .map_err(|e| GraphError::serialization("Failed to serialize paths", Some(e)))
}
