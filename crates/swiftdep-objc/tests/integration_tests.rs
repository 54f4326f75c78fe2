//! Integration tests for the Objective-C parser

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use swiftdep_objc::ObjcParser;
use swiftdep_parser_api::{ImportRef, LanguageParser, SymbolUsage, UsageKind};

fn get_fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixtures_dir().join(name)).unwrap()
}

fn has_usage(usages: &BTreeSet<SymbolUsage>, symbol: &str, kind: UsageKind) -> bool {
    usages.contains(&SymbolUsage::new(symbol, kind))
}

#[test]
fn test_parse_header() {
    let parser = ObjcParser::new();
    let facts = parser.analyze(&read_fixture("FeedController.h"));

    assert!(facts.declarations.contains("FeedController"));
    assert!(facts.declarations.contains("FeedControllerDelegate"));

    assert_eq!(facts.imports.len(), 1, "angle-bracket imports are not local");
    assert!(facts.imports.contains(&ImportRef::Local("FeedStore.h".to_string())));

    assert!(has_usage(&facts.usages, "FeedItem", UsageKind::Type));
    assert!(has_usage(&facts.usages, "ImageLoader", UsageKind::Type));
    assert!(has_usage(&facts.usages, "FeedStore", UsageKind::Type));
    assert!(has_usage(&facts.usages, "FeedControllerDelegate", UsageKind::Proto));
}

#[test]
fn test_parse_implementation() {
    let parser = ObjcParser::new();
    let facts = parser.analyze(&read_fixture("FeedController.m"));

    for expected in [
        "FeedController",
        "FeedController(Analytics)",
        "FeedLoadState",
        "FeedCacheKey",
    ] {
        assert!(facts.declarations.contains(expected), "missing declaration {expected}");
    }

    let expected_imports = [
        ImportRef::Local("FeedController.h".to_string()),
        ImportRef::Local("FeedItem.h".to_string()),
        ImportRef::Local("analytics.h".to_string()),
        ImportRef::ObjcModule("CoreData".to_string()),
    ];
    assert_eq!(facts.imports, expected_imports.into_iter().collect::<BTreeSet<_>>());
}

#[test]
fn test_usages_ignore_comments() {
    let parser = ObjcParser::new();
    let facts = parser.analyze(&read_fixture("FeedController.m"));

    assert!(has_usage(&facts.usages, "FeedItem", UsageKind::Type));
    assert!(has_usage(&facts.usages, "FeedItem.placeholderItem", UsageKind::Call));
    assert!(has_usage(&facts.usages, "prefetchImagesForItems", UsageKind::Call));
    assert!(has_usage(&facts.usages, "NSLog", UsageKind::Func));
    assert!(has_usage(&facts.usages, "dispatch_async", UsageKind::Func));

    assert!(!facts.usages.iter().any(|u| u.symbol.starts_with("LegacyCache")));
    assert!(!facts.usages.iter().any(|u| u.symbol.starts_with("FeedRenderer")));
    assert!(!facts.usages.iter().any(|u| u.symbol == "setPriority"));
}

#[test]
fn test_usage_extraction_is_deterministic() {
    let parser = ObjcParser::new();
    let source = read_fixture("FeedController.m");
    assert_eq!(parser.analyze(&source), parser.analyze(&source));
}

#[test]
fn test_empty_source() {
    let parser = ObjcParser::new();
    assert!(parser.analyze("").is_empty());
    assert!(parser.can_parse(Path::new("tests/fixtures/FeedController.m")));
}
