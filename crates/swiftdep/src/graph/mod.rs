//! Dependency graph model and analysis.
//!
//! This module defines:
//! - [`DependencyGraph`]: labelled adjacency between files and external modules
//! - [`algorithms`]: cycles, all-paths, transitive closure, orphans
//! - [`metrics`]: afferent/efferent coupling

mod dependency_graph;
mod types;
pub mod algorithms;
pub mod metrics;

pub use dependency_graph::{DependencyGraph, LabelSet};
pub use metrics::CouplingMetrics;
pub use types::{
    is_module, is_sentinel_label, NodeKind, IMPORT_LABEL, MODULE_IMPORT_LABEL,
    OBJC_MODULE_PREFIX, SWIFT_MODULE_PREFIX,
};
