//! Facts a parser extracts from a single file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use swiftdep::{OBJC_MODULE_PREFIX, SWIFT_MODULE_PREFIX};

/// Prefix of Swift `extension Name` declarations.
///
/// An extension signals that a file touches `Name` but never claims ownership of it.
pub const EXTENSION_PREFIX: &str = "extension:";

/// How a symbol was referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageKind {
    /// Type position: pointers, annotations, forward declarations, static receivers
    Type,
    /// Method or message send
    Call,
    /// Protocol adoption or `id<Protocol>`
    Proto,
    /// Call into a system framework function
    Func,
}

impl UsageKind {
    /// Lowercase tag used inside edge labels.
    pub fn as_str(self) -> &'static str {
        match self {
            UsageKind::Type => "type",
            UsageKind::Call => "call",
            UsageKind::Proto => "proto",
            UsageKind::Func => "func",
        }
    }
}

impl fmt::Display for UsageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(symbol, kind)` reference found in a file.
///
/// The symbol is either bare (`Foo`) or qualified (`Foo.bar`). The same symbol with
/// two different kinds is two distinct usages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolUsage {
    /// Referenced name, possibly `Type.member`
    pub symbol: String,
    /// How it was referenced
    pub kind: UsageKind,
}

impl SymbolUsage {
    /// Create a usage record.
    pub fn new(symbol: impl Into<String>, kind: UsageKind) -> Self {
        Self {
            symbol: symbol.into(),
            kind,
        }
    }

    /// The name used for resolution: the part before the first `.`.
    pub fn base(&self) -> &str {
        self.symbol
            .split_once('.')
            .map_or(self.symbol.as_str(), |(base, _)| base)
    }

    /// True for `Type.member` references.
    pub fn is_qualified(&self) -> bool {
        self.symbol.contains('.')
    }

    /// Edge label form: `symbol[kind]`.
    pub fn label(&self) -> String {
        format!("{}[{}]", self.symbol, self.kind)
    }
}

/// A referenced file or module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImportRef {
    /// Quoted `#import`/`#include` target, kept as written (usually a bare filename)
    Local(String),
    /// Objective-C `@import Module;`
    ObjcModule(String),
    /// Swift `import Module`
    SwiftModule(String),
}

impl ImportRef {
    /// Graph node for module references; local imports need resolving first.
    pub fn module_node(&self) -> Option<String> {
        match self {
            ImportRef::Local(_) => None,
            ImportRef::ObjcModule(name) => Some(format!("{OBJC_MODULE_PREFIX}{name}")),
            ImportRef::SwiftModule(name) => Some(format!("{SWIFT_MODULE_PREFIX}{name}")),
        }
    }

    /// True for both module flavours.
    pub fn is_module(&self) -> bool {
        !matches!(self, ImportRef::Local(_))
    }
}

impl fmt::Display for ImportRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportRef::Local(name) => f.write_str(name),
            ImportRef::ObjcModule(name) => write!(f, "{OBJC_MODULE_PREFIX}{name}"),
            ImportRef::SwiftModule(name) => write!(f, "{SWIFT_MODULE_PREFIX}{name}"),
        }
    }
}

/// Everything extracted from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFacts {
    /// Symbols the file defines (extensions carry [`EXTENSION_PREFIX`])
    pub declarations: BTreeSet<String>,
    /// Files and modules the file references
    pub imports: BTreeSet<ImportRef>,
    /// Symbols the file uses, extracted from comment-stripped text
    pub usages: BTreeSet<SymbolUsage>,
}

impl SourceFacts {
    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.imports.is_empty() && self.usages.is_empty()
    }

    /// Whether any usage is a bare (undotted) symbol.
    pub fn has_bare_usage(&self) -> bool {
        self.usages.iter().any(|usage| !usage.is_qualified())
    }
}

/// True for `extension:Name` declarations.
pub fn is_extension(symbol: &str) -> bool {
    symbol.starts_with(EXTENSION_PREFIX)
}
