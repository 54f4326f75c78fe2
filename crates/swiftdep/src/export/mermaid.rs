//! Mermaid flowchart export.

use super::NodeStyle;
use crate::error::Result;
use crate::graph::DependencyGraph;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Export graph as a Mermaid `graph LR` flowchart.
///
/// Nodes get synthetic ids (`n0`, `n1`, ...) in sorted node order; edges carry
/// their labels joined with `, `. Swift files, Objective-C files and modules are
/// assigned the `swift`, `objc` and `module` classes.
pub fn export_mermaid(graph: &DependencyGraph) -> Result<String> {
    let ids: BTreeMap<&str, String> = graph
        .nodes()
        .into_iter()
        .enumerate()
        .map(|(i, node)| (node, format!("n{i}")))
        .collect();

    let mut output = String::from("graph LR\n");
    for (node, id) in &ids {
        let class = match NodeStyle::of(node) {
            NodeStyle::Swift => "swift",
            NodeStyle::ObjC => "objc",
            NodeStyle::Module => "module",
        };
        let _ = writeln!(output, "    {id}[\"{}\"]:::{class}", escape_mermaid(node));
    }

    for (source, target, labels) in graph.edges() {
        let label = labels.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
        let _ = writeln!(
            output,
            "    {} -->|\"{}\"| {}",
            ids[source],
            escape_mermaid(&label),
            ids[target]
        );
    }

    output.push_str("    classDef swift fill:#FFAB91\n");
    output.push_str("    classDef objc fill:#90CAF9\n");
    output.push_str("    classDef module fill:#E0E0E0\n");
    Ok(output)
}

fn escape_mermaid(s: &str) -> String {
    s.replace('"', "#quot;")
}
