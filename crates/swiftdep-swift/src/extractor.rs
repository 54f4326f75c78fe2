//! Pattern-based extraction for Swift source text

use regex::Regex;
use std::collections::BTreeSet;
use swiftdep_parser_api::{
    is_meaningful_selector, is_valid_symbol, ImportRef, SymbolUsage, UsageKind, EXTENSION_PREFIX,
};

/// Standard library types never reported as `: Type` usages.
pub const SWIFT_BASIC_TYPES: &[&str] = &[
    "String", "Int", "Bool", "Double", "Float", "Any", "AnyObject", "Void", "NSObject",
    "Array", "Dictionary", "Set", "Optional",
];

/// Compiler-synthesized protocols never reported as conformances.
pub const SWIFT_COMMON_PROTOCOLS: &[&str] = &[
    "Codable", "Equatable", "Hashable", "Comparable", "Decodable", "Encodable",
];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Swift pattern literal must compile")
}

/// Compiled patterns for one parser instance.
#[derive(Debug, Clone)]
pub(crate) struct SwiftExtractor {
    type_decl: Regex,
    extension: Regex,
    func_decl: Regex,

    import: Regex,

    static_call: Regex,
    instance_call: Regex,
    type_annotation: Regex,
    conformance: Regex,
}

impl SwiftExtractor {
    pub(crate) fn new() -> Self {
        Self {
            type_decl: compile(r"\b(?:class|struct|enum|protocol)\s+([A-Za-z_]\w*)"),
            extension: compile(r"\bextension\s+([A-Za-z_]\w*)"),
            func_decl: compile(r"(?m)^\s*func\s+([A-Za-z_]\w*)\s*\("),

            import: compile(r"(?m)^\s*import\s+([A-Za-z_][\w\.]*)"),

            static_call: compile(r"\b([A-Z][A-Za-z_]\w*)\s*\.\s*([A-Za-z_]\w*)\s*\("),
            instance_call: compile(r"\b([a-z_][A-Za-z_]\w*)\s*\.\s*([A-Za-z_]\w*)\s*\("),
            type_annotation: compile(r":\s*([A-Z][A-Za-z_]\w*)"),
            conformance: compile(r":\s*([A-Z][A-Za-z_]\w*)(?:\s*,|\s*\{|\s*where|\s*$)"),
        }
    }

    /// Type declarations, `extension:Name` markers and `func` declarations.
    pub(crate) fn declarations(&self, text: &str) -> BTreeSet<String> {
        let mut declarations: BTreeSet<String> =
            group(&self.type_decl, text, 1).map(str::to_string).collect();

        declarations.extend(
            group(&self.extension, text, 1).map(|name| format!("{EXTENSION_PREFIX}{name}")),
        );

        // methods nested in a type match too; only the indentation is ignored
        declarations.extend(
            group(&self.func_decl, text, 1)
                .filter(|name| is_valid_symbol(name))
                .map(str::to_string),
        );

        declarations
    }

    pub(crate) fn imports(&self, text: &str) -> BTreeSet<ImportRef> {
        group(&self.import, text, 1)
            .map(|module| ImportRef::SwiftModule(module.to_string()))
            .collect()
    }

    pub(crate) fn symbol_usages(&self, text: &str) -> BTreeSet<SymbolUsage> {
        let mut usages = BTreeSet::new();

        for caps in self.static_call.captures_iter(text) {
            let (type_name, method) = (&caps[1], &caps[2]);
            if is_valid_symbol(type_name) {
                usages.insert(SymbolUsage::new(type_name, UsageKind::Type));
                if is_valid_symbol(method) {
                    usages.insert(SymbolUsage::new(
                        format!("{type_name}.{method}"),
                        UsageKind::Call,
                    ));
                }
            }
        }

        usages.extend(
            group(&self.instance_call, text, 2)
                .filter(|method| is_meaningful_selector(method))
                .map(|method| SymbolUsage::new(method, UsageKind::Call)),
        );

        usages.extend(
            group(&self.type_annotation, text, 1)
                .filter(|name| is_valid_symbol(name) && !SWIFT_BASIC_TYPES.contains(name))
                .map(|name| SymbolUsage::new(name, UsageKind::Type)),
        );

        usages.extend(
            group(&self.conformance, text, 1)
                .filter(|name| is_valid_symbol(name) && !SWIFT_COMMON_PROTOCOLS.contains(name))
                .map(|name| SymbolUsage::new(name, UsageKind::Proto)),
        );

        usages
    }
}

fn group<'r, 't>(re: &'r Regex, text: &'t str, index: usize) -> impl Iterator<Item = &'t str> + 'r
where
    't: 'r,
{
    re.captures_iter(text)
        .filter_map(move |caps| caps.get(index).map(|m| m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(symbol: &str, kind: UsageKind) -> SymbolUsage {
        SymbolUsage::new(symbol, kind)
    }

    #[test]
    fn test_type_declarations() {
        let source = "class FeedCache {}\nstruct FeedItem {}\nenum FeedState {}\nprotocol FeedSource {}\n";
        let declarations = SwiftExtractor::new().declarations(source);
        let expected: BTreeSet<String> = ["FeedCache", "FeedItem", "FeedState", "FeedSource"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(declarations, expected);
    }

    #[test]
    fn test_extension_is_marked() {
        let declarations = SwiftExtractor::new().declarations("extension FeedCache: FeedSource {}");
        assert!(declarations.contains("extension:FeedCache"));
        assert!(!declarations.contains("FeedCache"));
    }

    #[test]
    fn test_function_declarations() {
        let source = "func makeFeed() {}\n    func refreshAll(force: Bool) {}\nfunc load() {}\n";
        let declarations = SwiftExtractor::new().declarations(source);
        assert!(declarations.contains("makeFeed"));
        assert!(declarations.contains("refreshAll"));
        assert!(!declarations.contains("load"));
    }

    #[test]
    fn test_imports() {
        let imports = SwiftExtractor::new()
            .imports("import UIKit\n  import Foundation.NSURL\n// import Hidden\nlet important = 1\n");
        let expected: BTreeSet<ImportRef> = [
            ImportRef::SwiftModule("UIKit".into()),
            ImportRef::SwiftModule("Foundation.NSURL".into()),
        ]
        .into_iter()
        .collect();
        assert_eq!(imports, expected);
    }

    #[test]
    fn test_static_and_instance_calls() {
        let usages = SwiftExtractor::new()
            .symbol_usages("FeedCache.shared.purge()\nlet x = FeedCache.make()\nstore.reloadFeed()\nstore.setValue(1)\n");
        assert!(usages.contains(&usage("FeedCache", UsageKind::Type)));
        assert!(usages.contains(&usage("FeedCache.make", UsageKind::Call)));
        assert!(usages.contains(&usage("reloadFeed", UsageKind::Call)));
        assert!(!usages.iter().any(|u| u.symbol == "setValue"));
    }

    #[test]
    fn test_annotations_skip_basic_types() {
        let usages = SwiftExtractor::new().symbol_usages("let item: FeedItem\nvar name: String\n");
        assert!(usages.contains(&usage("FeedItem", UsageKind::Type)));
        assert!(!usages.iter().any(|u| u.symbol == "String" && u.kind == UsageKind::Type));
    }

    #[test]
    fn test_conformance_at_end_of_text() {
        let extractor = SwiftExtractor::new();
        for source in ["class Feed: FeedRenderable", "class Feed: FeedRenderable\n", "class Feed: FeedRenderable \n\n"] {
            let usages = extractor.symbol_usages(source);
            assert!(usages.contains(&usage("FeedRenderable", UsageKind::Proto)), "{source:?}");
        }
        let usages = extractor.symbol_usages("class Feed: FeedRenderable\nlet x = 1\n");
        assert!(!usages.contains(&usage("FeedRenderable", UsageKind::Proto)));
    }

    #[test]
    fn test_conformance_skips_synthesized_protocols() {
        let usages = SwiftExtractor::new()
            .symbol_usages("struct Item: FeedRenderable, Codable {\n}\nclass Box<T>: FeedContainer where T: Equatable {}");
        assert!(usages.contains(&usage("FeedRenderable", UsageKind::Proto)));
        assert!(usages.contains(&usage("FeedContainer", UsageKind::Proto)));
        assert!(!usages.iter().any(|u| u.symbol == "Codable" && u.kind == UsageKind::Proto));
    }
}
