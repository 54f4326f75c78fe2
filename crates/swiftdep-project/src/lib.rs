//! # swiftdep-project
//!
//! Project-level analysis for mixed Objective-C/Swift code bases: finds the source
//! files, extracts declarations and usages with the language parsers, resolves
//! them across files (bridging header included) and builds a
//! [`DependencyGraph`](swiftdep::DependencyGraph).
//!
//! ## Pipeline
//!
//! ```text
//! discovery -> collector (parallel) -> declaration index + bridging -> builder
//!                                                                       ↓
//!                                                         cache <- DependencyGraph
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use swiftdep_project::{build_graph, Fidelity, ProjectFiles};
//!
//! let project = ProjectFiles::discover("MyApp", &[], &["Pods".to_string()])?;
//! let graph = build_graph(&project, Fidelity::Shallow);
//! println!("{} edges", graph.edge_count());
//! # Ok::<(), swiftdep_project::ProjectError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod analyzer;
pub mod bridging;
pub mod builder;
pub mod cache;
pub mod collector;
pub mod config;
pub mod discovery;
pub mod error;
pub mod index;

pub use analyzer::DependencyAnalyzer;
pub use bridging::{find_bridging_header, BridgingResolver, BRIDGING_HEADER_PATTERNS};
pub use builder::{build_graph, build_index, Fidelity, GraphBuilder};
pub use cache::{fingerprint, GraphCache};
pub use collector::{collect, FileFacts, Parsers};
pub use config::{AnalyzerConfig, ConfigOverrides, CONFIG_FILE_NAMES};
pub use discovery::{find_project_root, should_ignore, ProjectFiles, SourceFile};
pub use error::{ProjectError, ProjectResult};
pub use index::{Collision, DeclarationIndex};
