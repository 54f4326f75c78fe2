//! DOT format export for Graphviz visualization.

use super::NodeStyle;
use crate::error::Result;
use crate::graph::DependencyGraph;
use std::collections::HashMap;
use std::fmt::Write;

/// Options for styling DOT export
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Fill colors (hex codes) per node style
    pub node_colors: HashMap<NodeStyle, String>,
    /// Graph layout direction: LR, TB, RL, BT
    pub rankdir: String,
    /// Print edge labels
    pub show_labels: bool,
    /// Cap on labels printed per edge; the rest are summarized as `+N`
    pub max_labels_per_edge: usize,
}

impl Default for DotOptions {
    fn default() -> Self {
        let mut node_colors = HashMap::new();
        node_colors.insert(NodeStyle::Swift, "#FFAB91".to_string());
        node_colors.insert(NodeStyle::ObjC, "#90CAF9".to_string());
        node_colors.insert(NodeStyle::Module, "#E0E0E0".to_string());

        DotOptions {
            node_colors,
            rankdir: "LR".to_string(),
            show_labels: true,
            max_labels_per_edge: 3,
        }
    }
}

impl DotOptions {
    /// Override the fill color for one kind of node.
    pub fn with_color(mut self, key: NodeStyle, color: impl Into<String>) -> Self {
        self.node_colors.insert(key, color.into());
        self
    }
}

/// Export graph to Graphviz DOT format
pub fn export_dot(graph: &DependencyGraph) -> Result<String> {
    export_dot_styled(graph, &DotOptions::default())
}

/// Export graph to Graphviz DOT format with custom styling
pub fn export_dot_styled(graph: &DependencyGraph, options: &DotOptions) -> Result<String> {
    let mut output = String::new();

    // writing into a String cannot fail
    let _ = writeln!(output, "digraph dependencies {{");
    let _ = writeln!(output, "    rankdir={};", options.rankdir);
    let _ = writeln!(output, "    node [shape=box, style=filled];\n");

    for node in graph.nodes() {
        let key = NodeStyle::of(node);
        let color = options
            .node_colors
            .get(&key)
            .map(String::as_str)
            .unwrap_or("#FFFFFF");
        let shape = if key == NodeStyle::Module { "folder" } else { "box" };
        let _ = writeln!(
            output,
            "    \"{}\" [shape={shape}, fillcolor=\"{color}\"];",
            escape_dot_label(node)
        );
    }

    output.push('\n');

    for (source, target, labels) in graph.edges() {
        let attrs = if options.show_labels {
            let mut shown: Vec<&str> = labels
                .iter()
                .take(options.max_labels_per_edge)
                .map(String::as_str)
                .collect();
            let hidden = labels.len().saturating_sub(shown.len());
            let more = format!("+{hidden}");
            if hidden > 0 {
                shown.push(&more);
            }
            format!(" [label=\"{}\"]", escape_dot_label(&shown.join("\n")))
        } else {
            String::new()
        };
        let _ = writeln!(
            output,
            "    \"{}\" -> \"{}\"{attrs};",
            escape_dot_label(source),
            escape_dot_label(target)
        );
    }

    output.push_str("}\n");
    Ok(output)
}

/// Escape special characters for DOT labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_dot_label() {
        assert_eq!(escape_dot_label("hello"), "hello");
        assert_eq!(escape_dot_label("quote\"here"), "quote\\\"here");
        assert_eq!(escape_dot_label("a\nb"), "a\\nb");
    }

    #[test]
    fn test_export_dot() {
        let mut graph = DependencyGraph::new();
        graph.add_edge("App/A.swift", "Legacy/B.h", "B[type]");
        graph.add_edge("App/A.swift", "module:UIKit", "<module-import>");

        let dot = export_dot(&graph).unwrap();
        assert!(dot.starts_with("digraph dependencies {"));
        assert!(dot.contains("\"App/A.swift\" [shape=box, fillcolor=\"#FFAB91\"];"));
        assert!(dot.contains("\"module:UIKit\" [shape=folder"));
        assert!(dot.contains("\"App/A.swift\" -> \"Legacy/B.h\" [label=\"B[type]\"];"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_label_cap() {
        let mut graph = DependencyGraph::new();
        for label in ["a[call]", "b[call]", "c[call]", "d[call]", "e[call]"] {
            graph.add_edge("A.m", "B.m", label);
        }
        let options = DotOptions {
            max_labels_per_edge: 2,
            ..DotOptions::default()
        };
        let dot = export_dot_styled(&graph, &options).unwrap();
        assert!(dot.contains("[label=\"a[call]\\nb[call]\\n+3\"]"));
    }
}
