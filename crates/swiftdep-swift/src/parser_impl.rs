//! Implementation of the LanguageParser trait for Swift

use crate::extractor::SwiftExtractor;
use std::collections::BTreeSet;
use swiftdep_parser_api::language::SWIFT_EXTENSIONS;
use swiftdep_parser_api::{ImportRef, Language, LanguageParser, SymbolUsage};

/// Swift language parser implementing the LanguageParser trait
#[derive(Debug, Clone)]
pub struct SwiftParser {
    extractor: SwiftExtractor,
}

impl SwiftParser {
    /// Create a parser with freshly compiled patterns.
    pub fn new() -> Self {
        Self {
            extractor: SwiftExtractor::new(),
        }
    }
}

impl Default for SwiftParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageParser for SwiftParser {
    fn language(&self) -> Language {
        Language::Swift
    }

    fn file_extensions(&self) -> &[&str] {
        SWIFT_EXTENSIONS
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_language() {
        let parser = SwiftParser::new();
        assert_eq!(parser.language(), Language::Swift);
        assert_eq!(parser.file_extensions(), &[".swift"]);
    }

    #[test]
    fn test_can_parse() {
        let parser = SwiftParser::new();
        assert!(parser.can_parse(Path::new("App/FeedView.swift")));
        assert!(!parser.can_parse(Path::new("App/FeedView.m")));
        assert!(!parser.can_parse(Path::new("Package")));
    }
}
