//! Export module for handing the dependency graph to external tools.
//!
//! Supported formats:
//! - **JSON**: the `source -> target -> [labels]` adjacency mapping
//! - **DOT**: Graphviz visualization
//! - **Mermaid**: flowcharts embeddable in Markdown
//! - **CSV**: edge lists and coupling reports for spreadsheets/pandas
//!
//! Exporters only render strings; writing them somewhere is up to the caller.

pub mod csv;
pub mod dot;
pub mod json;
pub mod mermaid;

pub use csv::{export_csv_edges, export_csv_metrics};
pub use dot::{export_dot, export_dot_styled, DotOptions};
pub use json::{export_json, export_paths_json};
pub use mermaid::export_mermaid;

/// Visual category of a node, used to pick colors and shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeStyle {
    /// `.swift` files
    Swift,
    /// Objective-C family files
    ObjC,
    /// External modules
    Module,
}

impl NodeStyle {
    /// Classify a node name.
    pub fn of(node: &str) -> Self {
        if crate::graph::is_module(node) {
            NodeStyle::Module
        } else if node.ends_with(".swift") {
            NodeStyle::Swift
        } else {
            NodeStyle::ObjC
        }
    }
}
