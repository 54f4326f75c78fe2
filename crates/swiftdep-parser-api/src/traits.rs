use crate::language::Language;
use crate::normalize::strip_comments;
use crate::types::{ImportRef, SourceFacts, SymbolUsage};
use std::collections::BTreeSet;
use std::path::Path;

/// Capability contract of a heuristic language parser.
///
/// A parser is a set of compiled patterns with three independent extraction
/// operations. None of them can fail: text that matches nothing simply yields empty
/// sets.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; the project collector shares one parser
/// per language across worker threads.
pub trait LanguageParser: Send + Sync {
    /// Language handled by this parser
    fn language(&self) -> Language;

    /// Supported file extensions, with leading dot (e.g. `[".swift"]`)
    fn file_extensions(&self) -> &[&str];

    /// Every type, protocol, category, enum and top-level function the text defines.
    ///
    /// Works on raw text; declarations inside comments are not filtered out.
    fn declarations(&self, text: &str) -> BTreeSet<String>;

    /// Local files and external modules the text imports. Works on raw text.
    fn imports(&self, text: &str) -> BTreeSet<ImportRef>;

    /// Approximate references to symbols declared elsewhere.
    ///
    /// Callers are expected to pass comment-stripped text (see [`strip_comments`]);
    /// [`analyze`](Self::analyze) does that.
    fn symbol_usages(&self, text: &str) -> BTreeSet<SymbolUsage>;

    /// Check if this parser can handle the given file
    ///
    /// Default implementation checks file extension.
    fn can_parse(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_str = format!(".{}", ext.to_string_lossy());
            self.file_extensions().contains(&ext_str.as_str())
        } else {
            false
        }
    }

    /// Run all three extractions: declarations and imports on the raw text, usages
    /// on the comment-stripped text.
    fn analyze(&self, text: &str) -> SourceFacts {
        SourceFacts {
            declarations: self.declarations(text),
            imports: self.imports(text),
            usages: self.symbol_usages(&strip_comments(text)),
        }
    }
}
