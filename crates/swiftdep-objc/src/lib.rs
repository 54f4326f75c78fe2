//! Objective-C parser for swiftdep
//!
//! This crate provides Objective-C and Objective-C++ support (`.m`, `.mm`, `.h`,
//! `.hh`). Extraction is pattern based: no preprocessing, no AST, and no attempt to
//! resolve receivers beyond what their spelling suggests.
//!
//! # Example
//!
//! ```rust
//! use swiftdep_objc::ObjcParser;
//! use swiftdep_parser_api::{ImportRef, LanguageParser, SymbolUsage, UsageKind};
//!
//! let parser = ObjcParser::new();
//!
//! let source = r#"
//! #import "Cache.h"
//! @import UIKit;
//!
//! @implementation FeedController
//! - (void)viewDidLoad {
//!     [Cache sharedCache];
//! }
//! @end
//! "#;
//!
//! let facts = parser.analyze(source);
//! assert!(facts.declarations.contains("FeedController"));
//! assert!(facts.imports.contains(&ImportRef::Local("Cache.h".to_string())));
//! assert!(facts.usages.contains(&SymbolUsage::new("Cache.sharedCache", UsageKind::Call)));
//! ```

mod extractor;
mod parser_impl;

pub use parser_impl::ObjcParser;
