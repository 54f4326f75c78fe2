//! Implementation of the LanguageParser trait for Objective-C

use crate::extractor::ObjcExtractor;
use std::collections::BTreeSet;
use swiftdep_parser_api::language::OBJC_EXTENSIONS;
use swiftdep_parser_api::{ImportRef, Language, LanguageParser, SymbolUsage};

/// Objective-C / Objective-C++ language parser implementing the LanguageParser trait
///
/// Patterns are compiled once per instance; build one parser and share it.
#[derive(Debug, Clone)]
pub struct ObjcParser {
    extractor: ObjcExtractor,
}

impl ObjcParser {
    /// Create a parser with freshly compiled patterns.
    pub fn new() -> Self {
        Self {
            extractor: ObjcExtractor::new(),
        }
    }
}

impl Default for ObjcParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for ObjcParser {
    fn language(&self) -> Language {
        Language::ObjC
    }

    fn file_extensions(&self) -> &[&str] {
        OBJC_EXTENSIONS
    }

    fn declarations(&self, text: &str) -> BTreeSet<String> {
        self.extractor.declarations(text)
    }

    fn imports(&self, text: &str) -> BTreeSet<ImportRef> {
        self.extractor.imports(text)
    }

    fn symbol_usages(&self, text: &str) -> BTreeSet<SymbolUsage> {
        self.extractor.symbol_usages(text)
    }
}
