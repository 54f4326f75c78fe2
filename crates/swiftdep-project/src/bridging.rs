//! Bridging header detection and the Swift-to-Objective-C visibility it grants.

use crate::discovery::{read_source, ProjectFiles};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use swiftdep_objc::ObjcParser;
use swiftdep_parser_api::{ImportRef, LanguageParser};

/// Glob patterns tried in order; the first pattern with a match wins.
pub const BRIDGING_HEADER_PATTERNS: &[&str] = &[
    "*-Bridging-Header.h",
    "*/*-Bridging-Header.h",
    "*Bridging-Header.h",
    "*/BridgingHeader.h",
];

/// Locate the bridging header of the project at `root`, if any.
///
/// Only the root and one level below it are searched. Within the winning pattern
/// the first match in glob order is used; other candidates are ignored.
pub fn find_bridging_header(root: &Path) -> Option<PathBuf> {
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    for pattern in BRIDGING_HEADER_PATTERNS {
        let full = format!("{escaped_root}/{pattern}");
        let paths = match glob::glob(&full) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Invalid bridging header pattern {full}: {e}");
                continue;
            }
        };
        if let Some(found) = paths.filter_map(Result::ok).find(|path| path.is_file()) {
            return Some(found);
        }
    }
    None
}

/// Objective-C files reachable from Swift through the bridging header.
///
/// Two sets are kept: the basenames the header imports, and the project files
/// those basenames resolve to. With no header both are empty.
#[derive(Debug, Clone, Default)]
pub struct BridgingResolver {
    header: Option<PathBuf>,
    imports: BTreeSet<String>,
    files: BTreeSet<String>,
}

impl BridgingResolver {
    /// Resolver for a project without a bridging header.
    pub fn none() -> Self {
        Self::default()
    }

    /// Detect the bridging header under the project root and resolve its imports.
    pub fn detect(project: &ProjectFiles, parser: &ObjcParser) -> Self {
        match find_bridging_header(project.root()) {
            Some(header) => {
                let text = read_source(&header);
                Self::from_header(header, &text, project, parser)
            }
            None => {
                debug!("No bridging header under {}", project.root().display());
                Self::none()
            }
        }
    }

    /// Build the resolver from an already-read header.
    pub fn from_header(
        header: PathBuf,
        text: &str,
        project: &ProjectFiles,
        parser: &ObjcParser,
    ) -> Self {
        let mut imports = BTreeSet::new();
        let mut files = BTreeSet::new();

        for import in parser.imports(text) {
            let ImportRef::Local(name) = import else {
                continue;
            };
            let basename = name.rsplit('/').next().unwrap_or(&name).to_string();
            files.extend(project.resolve_basename(&basename).map(str::to_string));
            imports.insert(basename);
        }

        info!(
            "Bridging header {} exposes {} imports ({} project files)",
            header.display(),
            imports.len(),
            files.len()
        );
        Self {
            header: Some(header),
            imports,
            files,
        }
    }

    /// Location of the detected header.
    pub fn header(&self) -> Option<&Path> {
        self.header.as_deref()
    }

    /// Whether a bridging header was found at all.
    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    /// Basenames imported by the header (Bridging Import Set).
    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    /// Project files the imports resolve to (Bridging File Set).
    pub fn files(&self) -> &BTreeSet<String> {
        &self.files
    }

    /// Whether the header imports a file with this basename.
    pub fn imports_basename(&self, basename: &str) -> bool {
        self.imports.contains(basename)
    }
}
