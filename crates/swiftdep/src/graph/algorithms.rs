//! Graph traversal and analysis algorithms.
//!
//! Every function here is a pure query over an already-built [`DependencyGraph`]:
//! cycle detection, bounded all-paths enumeration, transitive closure and orphan
//! detection. Node iteration follows the graph's sorted order, so results are
//! deterministic for a given graph.

use super::dependency_graph::DependencyGraph;
use super::types::{is_module, is_sentinel_label};
use crate::error::{GraphError, Result};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// Default edge limit for [`find_all_paths`].
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Detect dependency cycles with a depth-first search.
///
/// Every unvisited source node starts a traversal that keeps the current path and
/// the set of nodes on the traversal stack. Reaching a node that is already on the
/// stack emits the slice of the path from that node to the current one, closed by
/// repeating the first node: `[A, B, C, A]`.
///
/// The traversal is iterative, so path length is bounded by memory rather than by
/// the thread's stack.
///
/// Cycles over the same node set are reported once (the first one found). No
/// minimality is promised; a node may appear in several reported cycles.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut cycles = Vec::new();

    for node in graph.sources() {
        if !visited.contains(node) {
            visit_for_cycles(graph, node, &mut visited, &mut cycles);
        }
    }

    let mut seen: HashSet<Vec<String>> = HashSet::new();
    cycles
        .into_iter()
        .filter(|cycle| {
            let mut members = cycle[..cycle.len() - 1].to_vec();
            members.sort();
            seen.insert(members)
        })
        .collect()
}

/// One traversal from `root`; `frames[i]` holds the neighbors of `path[i]` not yet tried.
fn visit_for_cycles<'g>(
    graph: &'g DependencyGraph,
    root: &'g str,
    visited: &mut HashSet<&'g str>,
    cycles: &mut Vec<Vec<String>>,
) {
    let mut on_stack: HashSet<&str> = HashSet::new();
    let mut path: Vec<&str> = Vec::new();
    let mut frames = Vec::new();

    visited.insert(root);
    on_stack.insert(root);
    path.push(root);
    frames.push(graph.neighbors(root));

    while let Some(neighbors) = frames.last_mut() {
        let Some(neighbor) = neighbors.next() else {
            frames.pop();
            if let Some(done) = path.pop() {
                on_stack.remove(done);
            }
            continue;
        };

        if on_stack.contains(neighbor) {
            if let Some(start) = path.iter().position(|n| *n == neighbor) {
                let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(neighbor.to_string());
                cycles.push(cycle);
            }
        } else if visited.insert(neighbor) {
            on_stack.insert(neighbor);
            path.push(neighbor);
            frames.push(graph.neighbors(neighbor));
        }
    }
}

/// Find every simple path from `start` to `end` with at most `max_depth` edges.
///
/// Breadth-first expansion, so paths come out in non-decreasing length. A path
/// never revisits a node. `start == end` yields the single zero-edge path.
///
/// # Parameters
/// - `graph`: The graph to search
/// - `start`: Starting node
/// - `end`: Target node
/// - `max_depth`: Maximum number of edges per path (defaults to [`DEFAULT_MAX_DEPTH`])
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if either endpoint is absent from the graph.
pub fn find_all_paths(
    graph: &DependencyGraph,
    start: &str,
    end: &str,
    max_depth: Option<usize>,
) -> Result<Vec<Vec<String>>> {
    for node in [start, end] {
        if !graph.contains_node(node) {
            return Err(GraphError::node_not_found(node));
        }
    }

    if start == end {
        return Ok(vec![vec![start.to_string()]]);
    }

    let max_depth = max_depth.unwrap_or(DEFAULT_MAX_DEPTH);
    let mut paths = Vec::new();
    let mut queue: VecDeque<Vec<&str>> = VecDeque::new();
    queue.push_back(vec![start]);

    while let Some(path) = queue.pop_front() {
        // a path of n nodes has n - 1 edges; extending it adds one more
        if path.len() > max_depth {
            continue;
        }
        let current = path[path.len() - 1];

        for neighbor in graph.neighbors(current) {
            if path.contains(&neighbor) {
                continue;
            }
            let mut extended = path.clone();
            extended.push(neighbor);

            if neighbor == end {
                paths.push(extended.into_iter().map(str::to_string).collect());
            } else {
                queue.push_back(extended);
            }
        }
    }

    Ok(paths)
}

/// All nodes reachable from `start`, excluding `start` itself, sorted.
///
/// External-module nodes are neither reported nor traversed unless
/// `include_modules` is set.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if `start` is absent from the graph.
pub fn transitive_closure(
    graph: &DependencyGraph,
    start: &str,
    include_modules: bool,
) -> Result<Vec<String>> {
    if !graph.contains_node(start) {
        return Err(GraphError::node_not_found(start));
    }

    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        for neighbor in graph.neighbors(current) {
            if !include_modules && is_module(neighbor) {
                continue;
            }
            if !visited.contains(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    visited.remove(start);
    Ok(visited.into_iter().map(str::to_string).collect())
}

/// Project files that never appear in the graph, neither as source nor as target.
///
/// `files` is the full project listing (project-relative paths); the result is
/// sorted and deduplicated.
pub fn find_orphan_files<I, S>(graph: &DependencyGraph, files: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let referenced: HashSet<&str> = graph
        .nodes()
        .into_iter()
        .filter(|node| !is_module(node))
        .collect();

    files
        .into_iter()
        .filter(|file| !referenced.contains(file.as_ref()))
        .map(|file| file.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Render a path one hop per line, naming the first symbol label of each edge.
///
/// Hops whose edge only carries sentinel labels (or no edge at all) are rendered
/// as `A -> B`.
pub fn describe_path(graph: &DependencyGraph, path: &[String]) -> String {
    path.windows(2)
        .map(|hop| {
            let (source, target) = (&hop[0], &hop[1]);
            let symbol = graph
                .labels(source, target)
                .and_then(|labels| labels.iter().find(|label| !is_sentinel_label(label)));
            match symbol {
                Some(label) => format!("{source} -> {label} -> {target}"),
                None => format!("{source} -> {target}"),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(nodes: &[&str]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for pair in nodes.windows(2) {
            graph.add_edge(pair[0], pair[1], format!("{}[type]", pair[1]));
        }
        graph
    }

    #[test]
    fn test_three_file_cycle() {
        let mut graph = chain(&["A.swift", "B.swift", "C.swift"]);
        graph.add_edge("C.swift", "A.swift", "A[type]");

        let cycles = find_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0], vec!["A.swift", "B.swift", "C.swift", "A.swift"]);
    }

    #[test]
    fn test_acyclic_graph_has_no_cycles() {
        let graph = chain(&["A.m", "B.m", "C.m", "D.m"]);
        assert!(find_cycles(&graph).is_empty());
    }

    #[test]
    fn test_two_cycles_sharing_a_node() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("A", "B", "B[type]");
        graph.add_edge("B", "A", "A[type]");
        graph.add_edge("B", "C", "C[type]");
        graph.add_edge("C", "B", "B[type]");

        let cycles = find_cycles(&graph);
        assert_eq!(cycles.len(), 2);
        assert!(cycles.contains(&vec!["A".to_string(), "B".into(), "A".into()]));
        assert!(cycles.contains(&vec!["B".to_string(), "C".into(), "B".into()]));
    }

    #[test]
    fn test_cycles_on_deep_chain() {
        let nodes: Vec<String> = (0..50_000).map(|i| format!("N{i:05}.m")).collect();
        let names: Vec<&str> = nodes.iter().map(String::as_str).collect();
        let mut graph = chain(&names);
        assert!(find_cycles(&graph).is_empty());

        graph.add_edge("N49999.m", "N00000.m", "N00000[type]");
        let cycles = find_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 50_001);
        assert_eq!(cycles[0][0], "N00000.m");
        assert_eq!(cycles[0][50_000], "N00000.m");
    }

    #[test]
    fn test_paths_in_length_order() {
        let mut graph = chain(&["A", "B", "C", "D"]);
        graph.add_edge("A", "D", "D[type]");

        let paths = find_all_paths(&graph, "A", "D", None).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], vec!["A", "D"]);
        assert_eq!(paths[1], vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_paths_respect_max_depth() {
        let graph = chain(&["A", "B", "C", "D"]);
        assert!(find_all_paths(&graph, "A", "D", Some(2)).unwrap().is_empty());
        assert_eq!(find_all_paths(&graph, "A", "D", Some(3)).unwrap().len(), 1);
    }

    #[test]
    fn test_paths_to_self() {
        let graph = chain(&["A", "B"]);
        assert_eq!(find_all_paths(&graph, "A", "A", None).unwrap(), vec![vec!["A"]]);
    }

    #[test]
    fn test_paths_unknown_node() {
        let graph = chain(&["A", "B"]);
        let err = find_all_paths(&graph, "A", "Z", None).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound { node } if node == "Z"));
    }

    #[test]
    fn test_closure_skips_modules_by_default() {
        let mut graph = chain(&["A", "B", "C"]);
        graph.add_edge("B", "module:Foundation", "<module-import>");

        assert_eq!(transitive_closure(&graph, "A", false).unwrap(), vec!["B", "C"]);
        assert_eq!(
            transitive_closure(&graph, "A", true).unwrap(),
            vec!["B", "C", "module:Foundation"]
        );
    }

    #[test]
    fn test_closure_excludes_start_in_cycle() {
        let mut graph = chain(&["A", "B"]);
        graph.add_edge("B", "A", "A[type]");
        assert_eq!(transitive_closure(&graph, "A", false).unwrap(), vec!["B"]);
    }

    #[test]
    fn test_orphans() {
        let mut graph = chain(&["A.m", "B.h"]);
        graph.add_edge("A.m", "@module:UIKit", "<module-import>");

        let orphans = find_orphan_files(&graph, ["A.m", "B.h", "C.swift", "@module:UIKit"]);
        assert_eq!(orphans, vec!["@module:UIKit", "C.swift"]);
    }

    #[test]
    fn test_describe_path() {
        let mut graph = chain(&["A", "B"]);
        graph.add_edge("B", "C", "<import>");

        let path = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert_eq!(describe_path(&graph, &path), "A -> B[type] -> B\nB -> C");
        assert_eq!(describe_path(&graph, &path[..1]), "");
    }
}
