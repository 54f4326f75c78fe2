//! Pattern-based extraction for Objective-C source text

use regex::Regex;
use std::collections::BTreeSet;
use swiftdep_parser_api::{
    is_meaningful_selector, is_valid_symbol, ImportRef, SymbolUsage, UsageKind,
};

/// `Type *` usages with these prefixes are framework types.
const SYSTEM_TYPE_PREFIXES: &[&str] = &["NS", "UI"];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Objective-C pattern literal must compile")
}

/// Compiled patterns for one parser instance.
#[derive(Debug, Clone)]
pub(crate) struct ObjcExtractor {
    interface: Regex,
    protocol: Regex,
    implementation: Regex,
    category: Regex,
    ns_enum: Regex,
    c_function: Regex,

    import_local: Regex,
    include_local: Regex,
    import_module: Regex,

    class_forward: Regex,
    msg_send_class: Regex,
    msg_send_object: Regex,
    pointer_type: Regex,
    protocol_use: Regex,
    system_call: Regex,
}

impl ObjcExtractor {
    pub(crate) fn new() -> Self {
        Self {
            interface: compile(r"@interface\s+([A-Za-z_]\w*)"),
            protocol: compile(r"@protocol\s+([A-Za-z_]\w*)"),
            implementation: compile(r"@implementation\s+([A-Za-z_]\w*)"),
            category: compile(r"@interface\s+([A-Za-z_]\w*)\s*\(([A-Za-z_]\w*)\)"),
            ns_enum: compile(r"typedef\s+NS_ENUM\s*\([^,]+,\s*([A-Za-z_]\w*)\)"),
            c_function: compile(
                r"(?m)^(?:static\s+)?(?:inline\s+)?(?:extern\s+)?[A-Za-z_]\w*\s+\*?\s*([A-Za-z_]\w*)\s*\(",
            ),

            import_local: compile(r#"#\s*import\s*"([^"]+)""#),
            include_local: compile(r#"#\s*include\s*"([^"]+)""#),
            import_module: compile(r"@import\s+([A-Za-z_][\w\.]*)\s*;"),

            class_forward: compile(r"@class\s+([A-Za-z_]\w*(?:\s*,\s*[A-Za-z_]\w*)*)\s*;"),
            msg_send_class: compile(r"\[\s*([A-Z][A-Za-z_]\w*)\s+([A-Za-z_]\w*)"),
            msg_send_object: compile(r"\[\s*([a-z_][A-Za-z_]\w*)\s+([A-Za-z_]\w*)"),
            pointer_type: compile(r"\b([A-Z][A-Za-z_]\w*)\s*\*"),
            protocol_use: compile(r"id\s*<\s*([A-Za-z_]\w*)\s*>"),
            system_call: compile(
                r"\b(NS[A-Z]\w*|CF[A-Z]\w*|CG[A-Z]\w*|UI[A-Z]\w*|dispatch_\w+|pthread_\w+)\s*\(",
            ),
        }
    }

    /// Interfaces, protocols, implementations, `Class(Category)` pairs, `NS_ENUM`
    /// typedefs and top-level C functions.
    pub(crate) fn declarations(&self, text: &str) -> BTreeSet<String> {
        let mut declarations = BTreeSet::new();

        for re in [&self.interface, &self.protocol, &self.implementation, &self.ns_enum] {
            declarations.extend(group(re, text, 1).map(str::to_string));
        }

        for caps in self.category.captures_iter(text) {
            declarations.insert(format!("{}({})", &caps[1], &caps[2]));
        }

        declarations.extend(
            group(&self.c_function, text, 1)
                .filter(|name| is_valid_symbol(name))
                .map(str::to_string),
        );

        declarations
    }

    /// Quoted `#import`/`#include` targets and `@import` modules.
    pub(crate) fn imports(&self, text: &str) -> BTreeSet<ImportRef> {
        let mut imports = BTreeSet::new();

        for re in [&self.import_local, &self.include_local] {
            imports.extend(group(re, text, 1).map(|name| ImportRef::Local(name.to_string())));
        }
        imports.extend(
            group(&self.import_module, text, 1).map(|name| ImportRef::ObjcModule(name.to_string())),
        );

        imports
    }

    pub(crate) fn symbol_usages(&self, text: &str) -> BTreeSet<SymbolUsage> {
        let mut usages = BTreeSet::new();

        // @class A, B;
        for list in group(&self.class_forward, text, 1) {
            usages.extend(
                list.split(',')
                    .map(str::trim)
                    .filter(|name| is_valid_symbol(name))
                    .map(|name| SymbolUsage::new(name, UsageKind::Type)),
            );
        }

        for caps in self.msg_send_class.captures_iter(text) {
            let (class, selector) = (&caps[1], &caps[2]);
            if is_valid_symbol(class) {
                usages.insert(SymbolUsage::new(class, UsageKind::Type));
                if is_valid_symbol(selector) {
                    usages.insert(SymbolUsage::new(format!("{class}.{selector}"), UsageKind::Call));
                }
            }
        }

        // the receiver is a variable; only the selector says anything
        usages.extend(
            group(&self.msg_send_object, text, 2)
                .filter(|selector| is_meaningful_selector(selector))
                .map(|selector| SymbolUsage::new(selector, UsageKind::Call)),
        );

        usages.extend(
            group(&self.pointer_type, text, 1)
                .filter(|name| is_valid_symbol(name) && !is_system_type(name))
                .map(|name| SymbolUsage::new(name, UsageKind::Type)),
        );

        usages.extend(
            group(&self.protocol_use, text, 1)
                .filter(|name| is_valid_symbol(name))
                .map(|name| SymbolUsage::new(name, UsageKind::Proto)),
        );

        usages.extend(
            group(&self.system_call, text, 1).map(|name| SymbolUsage::new(name, UsageKind::Func)),
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

fn is_system_type(name: &str) -> bool {
    SYSTEM_TYPE_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}
