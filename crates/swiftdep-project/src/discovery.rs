//! Source file discovery and project layout helpers.

use crate::error::{ProjectError, ProjectResult};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use swiftdep_parser_api::Language;
use walkdir::WalkDir;

/// Markers whose presence identifies a project root.
const ROOT_MARKER_EXTENSIONS: &[&str] = &["xcodeproj", "xcworkspace"];
const ROOT_MARKER_FILES: &[&str] = &["Package.swift", ".git"];

/// One discovered source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Root-relative path with `/` separators; this is the graph node name
    pub path: String,
    /// Location on disk
    pub absolute: PathBuf,
    /// Parser variant responsible for the file
    pub language: Language,
}

impl SourceFile {
    /// Final path component.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Every analyzable file under a project root, in deterministic order.
#[derive(Debug, Clone, Default)]
pub struct ProjectFiles {
    root: PathBuf,
    files: Vec<SourceFile>,
    index: BTreeMap<String, usize>,
    by_basename: BTreeMap<String, BTreeSet<String>>,
    ignore_patterns: BTreeSet<String>,
    custom_extensions: BTreeSet<String>,
}

impl ProjectFiles {
    /// Walk `root` and collect every file with a supported extension.
    ///
    /// Built-in Objective-C and Swift extensions are always recognized;
    /// `custom_extensions` (with leading dot) are added as Objective-C family.
    /// Files whose root-relative path matches one of `ignore_patterns` are skipped
    /// (see [`should_ignore`]). Traversal is sorted by file name, so the file order
    /// is stable across runs.
    ///
    /// # Errors
    ///
    /// [`ProjectError::RootNotFound`] if `root` is not a directory. Entries that
    /// cannot be read during the walk are logged and skipped.
    pub fn discover(
        root: impl AsRef<Path>,
        custom_extensions: &[String],
        ignore_patterns: &[String],
    ) -> ProjectResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(ProjectError::RootNotFound(root.to_path_buf()));
        }

        let mut project = Self {
            root: root.to_path_buf(),
            ignore_patterns: ignore_patterns
                .iter()
                .map(|pattern| pattern.trim_end_matches('/'))
                .filter(|pattern| !pattern.is_empty())
                .map(str::to_string)
                .collect(),
            custom_extensions: custom_extensions.iter().cloned().collect(),
            ..Self::default()
        };

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };
            // symlinked files count, symlinked directories are not descended
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }

            let Some(language) = language_for(entry.path(), custom_extensions) else {
                continue;
            };
            let Some(rel) = relative_path(root, entry.path()) else {
                continue;
            };
            if should_ignore(&rel, ignore_patterns) {
                continue;
            }

            project.push(SourceFile {
                path: rel,
                absolute: entry.path().to_path_buf(),
                language,
            });
        }

        debug!(
            "Discovered {} source files under {}",
            project.files.len(),
            root.display()
        );
        Ok(project)
    }

    /// Build a listing from already-known files (root-relative paths).
    pub fn from_files(root: impl Into<PathBuf>, files: impl IntoIterator<Item = SourceFile>) -> Self {
        let mut project = Self {
            root: root.into(),
            ..Self::default()
        };
        for file in files {
            project.push(file);
        }
        project
    }

    fn push(&mut self, file: SourceFile) {
        if self.index.contains_key(&file.path) {
            return;
        }
        self.by_basename
            .entry(file.file_name().to_string())
            .or_default()
            .insert(file.path.clone());
        self.index.insert(file.path.clone(), self.files.len());
        self.files.push(file);
    }

    /// Project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ignore patterns the listing was filtered with, trailing slashes removed.
    pub fn ignore_patterns(&self) -> &BTreeSet<String> {
        &self.ignore_patterns
    }

    /// Extra extensions the listing was built with.
    pub fn custom_extensions(&self) -> &BTreeSet<String> {
        &self.custom_extensions
    }

    /// Files in discovery order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Root-relative paths in discovery order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|file| file.path.as_str())
    }

    /// Look up a file by its root-relative path.
    pub fn get(&self, path: &str) -> Option<&SourceFile> {
        self.index.get(path).map(|&i| &self.files[i])
    }

    /// Language of a project file; `None` for modules and unknown paths.
    pub fn language_of(&self, path: &str) -> Option<Language> {
        self.get(path).map(|file| file.language)
    }

    /// All files sharing the final component of `import`.
    ///
    /// `#import "Sub/Dir/Foo.h"` and `#import "Foo.h"` both resolve to every
    /// `Foo.h` in the project; ambiguity is deliberately left unresolved.
    pub fn resolve_basename(&self, import: &str) -> impl Iterator<Item = &str> {
        let basename = import
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(import);
        self.by_basename
            .get(basename)
            .into_iter()
            .flat_map(|paths| paths.iter().map(String::as_str))
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no analyzable file was found.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Parser variant for `path`, honoring custom extensions.
pub fn language_for(path: &Path, custom_extensions: &[String]) -> Option<Language> {
    let ext = path.extension()?.to_str()?;
    Language::from_extension(ext).or_else(|| {
        custom_extensions
            .iter()
            .any(|custom| custom.strip_prefix('.') == Some(ext))
            .then_some(Language::ObjC)
    })
}

/// Whether a root-relative path is excluded by any of `patterns`.
///
/// A pattern matches when the path equals it or lies underneath it as a directory
/// (`Pods` matches `Pods/A.m` but not `PodsExtra/A.m`). Trailing slashes on
/// patterns are ignored.
pub fn should_ignore(rel_path: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        let pattern = pattern.trim_end_matches('/');
        if pattern.is_empty() {
            return false;
        }
        rel_path == pattern
            || rel_path
                .strip_prefix(pattern)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Walk upward from `path` to the nearest directory that looks like a project root.
///
/// A directory qualifies if it contains an `.xcodeproj` or `.xcworkspace` bundle,
/// a `Package.swift` or a `.git` entry. Without any marker the starting directory
/// (or the file's parent) is returned.
pub fn find_project_root(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let start = if path.is_dir() {
        path
    } else {
        match path.parent() {
            // bare file name: relative to the working directory
            Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
            Some(parent) => parent,
            None => path,
        }
    };

    for dir in start.ancestors() {
        if dir.parent().is_none() {
            break;
        }
        if is_project_root(dir) {
            debug!("Project root detected at {}", dir.display());
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

fn is_project_root(dir: &Path) -> bool {
    if ROOT_MARKER_FILES.iter().any(|name| dir.join(name).exists()) {
        return true;
    }
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    entries.filter_map(Result::ok).any(|entry| {
        entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ROOT_MARKER_EXTENSIONS.contains(&ext))
    })
}

/// Read a source file as UTF-8, dropping invalid sequences.
///
/// Invalid bytes are removed rather than replaced, so `Caf\xffe` reads as `Cafe`.
/// An unreadable file yields empty text: it still takes part in the graph, it
/// just declares and uses nothing.
pub fn read_source(path: &Path) -> String {
    match fs::read(path) {
        Ok(bytes) => decode_ignoring_invalid(&bytes),
        Err(e) => {
            warn!("Failed to read {}: {e}", path.display());
            String::new()
        }
    }
}

fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = rel
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
