//! # swiftdep
//!
//! File-level dependency graph for mixed Objective-C/Swift code bases, plus the
//! analyses that run on it.
//!
//! ## Core Principles
//!
//! - **Parser Agnostic**: the graph only knows file paths, module markers and labels
//! - **Deterministic**: ordered maps everywhere, so the same input gives the same output
//! - **Zero Magic**: building, caching and exporting are explicit calls
//!
//! ## Architecture
//!
//! ```text
//! Project layer (discovery, index, builder, cache)
//!     ↓
//! Language parsers (Objective-C, Swift)
//!     ↓
//! Core Graph (labelled adjacency, algorithms, metrics)
//!     ↓
//! Export (JSON, DOT, Mermaid, CSV) / Storage Backend (files, memory, RocksDB)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use swiftdep::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_edge("App/Feed.swift", "Legacy/Cache.h", "Cache[type]");
//! graph.add_edge("Legacy/Cache.m", "Legacy/Cache.h", "<import>");
//!
//! let closure = graph.transitive_closure("App/Feed.swift", false).unwrap();
//! assert_eq!(closure, vec!["Legacy/Cache.h"]);
//! assert!(graph.find_cycles().is_empty());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod export;
pub mod graph;
pub mod storage;

// Re-export main types
pub use error::{GraphError, Result};
pub use graph::{
    is_module, is_sentinel_label, CouplingMetrics, DependencyGraph, LabelSet, NodeKind,
    IMPORT_LABEL, MODULE_IMPORT_LABEL, OBJC_MODULE_PREFIX, SWIFT_MODULE_PREFIX,
};
#[cfg(feature = "rocksdb-backend")]
pub use storage::RocksDBBackend;
pub use storage::{FileBackend, MemoryBackend, StorageBackend};
