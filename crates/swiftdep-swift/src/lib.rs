//! Swift parser for swiftdep
//!
//! This crate provides Swift language support. Like the Objective-C variant it is
//! a set of patterns, not a parser in the compiler sense.
//!
//! # Example
//!
//! ```rust
//! use swiftdep_parser_api::{ImportRef, LanguageParser, SymbolUsage, UsageKind};
//! use swiftdep_swift::SwiftParser;
//!
//! let parser = SwiftParser::new();
//!
//! let source = r#"
//! import Foundation
//!
//! final class FeedViewModel: ObservableObject {
//!     let store: FeedStore
//!
//!     func refreshFeed() {
//!         FeedCache.purge()
//!     }
//! }
//! "#;
//!
//! let facts = parser.analyze(source);
//! assert!(facts.declarations.contains("FeedViewModel"));
//! assert!(facts.imports.contains(&ImportRef::SwiftModule("Foundation".to_string())));
//! assert!(facts.usages.contains(&SymbolUsage::new("FeedStore", UsageKind::Type)));
//! assert!(facts.usages.contains(&SymbolUsage::new("FeedCache.purge", UsageKind::Call)));
//! ```

mod extractor;
mod parser_impl;

pub use extractor::{SWIFT_BASIC_TYPES, SWIFT_COMMON_PROTOCOLS};
pub use parser_impl::SwiftParser;
