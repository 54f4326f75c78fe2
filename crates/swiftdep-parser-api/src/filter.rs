//! Symbol validity filter shared by the parser variants.
//!
//! Heuristic extraction over-matches badly on lifecycle, collection and I/O method
//! names that nearly every class has. Those names, very short names and names that
//! start with a digit never become declarations or usages.

/// Near-universal method and value names that would flood the graph with noise.
pub const COMMON_KEYWORDS: &[&str] = &[
    "self", "super", "nil", "null", "true", "false", "YES", "NO",
    "init", "dealloc", "alloc", "new", "copy", "retain", "release", "autorelease",
    "description", "debugDescription", "hash", "isEqual", "class",
    "cancel", "start", "stop", "pause", "resume", "reset", "clear", "refresh",
    "load", "save", "open", "close", "read", "write", "delete", "remove", "add",
    "insert", "update", "replace", "get", "set", "count", "size", "begin", "end",
    "first", "last", "next", "previous", "current", "show", "hide", "enable",
    "disable", "validate", "invalidate", "connect", "disconnect", "send", "receive",
    "process", "handle", "error", "warning", "info", "debug", "log", "print",
    "format", "encode", "decode", "serialize", "deserialize", "parse", "stringify",
    "startListening", "stopListening", "isListening",
];

/// Whether `symbol` may become a declaration or usage at all.
///
/// Rejects empty names, [`COMMON_KEYWORDS`], names of two characters or fewer and
/// names starting with a digit.
pub fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && !COMMON_KEYWORDS.contains(&symbol)
        && symbol.chars().count() > 2
        && !symbol.starts_with(|c: char| c.is_ascii_digit())
}

/// Stricter check for selectors sent to receivers that cannot be resolved.
///
/// On top of [`is_valid_symbol`], the selector must be longer than four characters
/// and must not look like an accessor (`set...`/`get...`).
pub fn is_meaningful_selector(selector: &str) -> bool {
    is_valid_symbol(selector)
        && selector.chars().count() > 4
        && !selector.starts_with("set")
        && !selector.starts_with("get")
}
