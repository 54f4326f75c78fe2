use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Objective-C family extensions (headers and implementation files).
pub const OBJC_EXTENSIONS: &[&str] = &[".m", ".mm", ".h", ".hh"];

/// Swift source extensions.
pub const SWIFT_EXTENSIONS: &[&str] = &[".swift"];

/// Language tag of a source file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    /// Objective-C and Objective-C++ (`.m`, `.mm`, `.h`, `.hh`)
    ObjC,
    /// Swift (`.swift`)
    Swift,
}

impl Language {
    /// Look up a language by extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let dotted = if ext.starts_with('.') {
            ext.to_ascii_lowercase()
        } else {
            format!(".{}", ext.to_ascii_lowercase())
        };
        if OBJC_EXTENSIONS.contains(&dotted.as_str()) {
            Some(Language::ObjC)
        } else if SWIFT_EXTENSIONS.contains(&dotted.as_str()) {
            Some(Language::Swift)
        } else {
            None
        }
    }

    /// Language of `path`, if its extension is a known one.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Extensions owned by this language.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::ObjC => OBJC_EXTENSIONS,
            Language::Swift => SWIFT_EXTENSIONS,
        }
    }

    /// Lowercase identifier, e.g. `"objc"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::ObjC => "objc",
            Language::Swift => "swift",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path("App/View.swift"), Some(Language::Swift));
        assert_eq!(Language::from_path("Legacy/Cache.mm"), Some(Language::ObjC));
        assert_eq!(Language::from_path("Legacy/Cache.H"), Some(Language::ObjC));
        assert_eq!(Language::from_path("README.md"), None);
        assert_eq!(Language::from_path("Makefile"), None);
    }

    #[test]
    fn test_from_extension_accepts_both_forms() {
        assert_eq!(Language::from_extension("hh"), Some(Language::ObjC));
        assert_eq!(Language::from_extension(".swift"), Some(Language::Swift));
    }
}
