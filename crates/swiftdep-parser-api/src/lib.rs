//! swiftdep Parser API
//!
//! Shared trait and types for the heuristic language parsers.
//!
//! This crate defines:
//!
//! - **LanguageParser trait**: the three-capability contract every parser variant implements
//! - **Source facts**: declarations, imports and symbol usages extracted from one file
//! - **Text normalizer**: comment stripping applied before usage extraction
//! - **Symbol filter**: the validity predicate shared by both languages
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use swiftdep_parser_api::{ImportRef, Language, LanguageParser, SymbolUsage};
//!
//! struct NullParser;
//!
//! impl LanguageParser for NullParser {
//!     fn language(&self) -> Language {
//!         Language::Swift
//!     }
//!
//!     fn file_extensions(&self) -> &[&str] {
//!         &[".swift"]
//!     }
//!
//!     fn declarations(&self, _text: &str) -> BTreeSet<String> {
//!         BTreeSet::new()
//!     }
//!
//!     fn imports(&self, _text: &str) -> BTreeSet<ImportRef> {
//!         BTreeSet::new()
//!     }
//!
//!     fn symbol_usages(&self, _text: &str) -> BTreeSet<SymbolUsage> {
//!         BTreeSet::new()
//!     }
//! }
//!
//! let facts = NullParser.analyze("import UIKit // nothing to see");
//! assert!(facts.is_empty());
//! ```

pub mod filter;
pub mod language;
pub mod normalize;
pub mod traits;
pub mod types;


// Re-export commonly used types
pub use filter::{is_meaningful_selector, is_valid_symbol};
pub use language::Language;
pub use normalize::strip_comments;
pub use traits::LanguageParser;
pub use types::{is_extension, ImportRef, SourceFacts, SymbolUsage, UsageKind, EXTENSION_PREFIX};
