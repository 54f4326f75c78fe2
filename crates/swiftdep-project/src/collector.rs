//! Per-file extraction: declarations, imports and symbol usages for every project file.

use crate::discovery::{read_source, ProjectFiles, SourceFile};
use log::{debug, trace};
use rayon::prelude::*;
use std::collections::BTreeSet;
use swiftdep_objc::ObjcParser;
use swiftdep_parser_api::{ImportRef, Language, LanguageParser, SourceFacts};
use swiftdep_swift::SwiftParser;

/// One parser per language, shared by every worker thread.
#[derive(Debug, Default)]
pub struct Parsers {
    /// Objective-C family (`.h`, `.m`, `.mm`, `.hh` and custom extensions)
    pub objc: ObjcParser,
    /// Swift
    pub swift: SwiftParser,
}

impl Parsers {
    /// Compile both parsers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser responsible for `language`.
    pub fn for_language(&self, language: Language) -> &dyn LanguageParser {
        match language {
            Language::ObjC => &self.objc,
            Language::Swift => &self.swift,
        }
    }
}

/// Extraction result for one file, with local imports already resolved.
#[derive(Debug, Clone)]
pub struct FileFacts {
    /// The file the facts belong to
    pub file: SourceFile,
    /// Raw parser output
    pub facts: SourceFacts,
    /// Project files matched by basename from local imports (possibly several per import)
    pub local_imports: BTreeSet<String>,
    /// Module nodes (`@module:X` / `module:X`)
    pub module_imports: BTreeSet<String>,
}

impl FileFacts {
    /// Run the file's parser over `text` and resolve its local imports against `project`.
    pub fn extract(file: &SourceFile, text: &str, project: &ProjectFiles, parsers: &Parsers) -> Self {
        let facts = parsers.for_language(file.language).analyze(text);

        let mut local_imports = BTreeSet::new();
        let mut module_imports = BTreeSet::new();
        for import in &facts.imports {
            match import {
                ImportRef::Local(name) => {
                    let before = local_imports.len();
                    local_imports.extend(project.resolve_basename(name).map(str::to_string));
                    if local_imports.len() == before {
                        trace!("{}: unresolved import {name}", file.path);
                    }
                }
                module => module_imports.extend(module.module_node()),
            }
        }

        Self {
            file: file.clone(),
            facts,
            local_imports,
            module_imports,
        }
    }

    /// Root-relative path of the file.
    pub fn path(&self) -> &str {
        &self.file.path
    }
}

/// Read and analyze every project file in parallel.
///
/// The result follows the project's file order regardless of scheduling, so anything
/// that depends on "first seen" stays reproducible.
pub fn collect(project: &ProjectFiles, parsers: &Parsers) -> Vec<FileFacts> {
    let facts: Vec<FileFacts> = project
        .files()
        .par_iter()
        .map(|file| {
            let text = read_source(&file.absolute);
            FileFacts::extract(file, &text, project, parsers)
        })
        .collect();

    debug!(
        "Collected facts for {} files ({} declarations, {} usages)",
        facts.len(),
        facts.iter().map(|f| f.facts.declarations.len()).sum::<usize>(),
        facts.iter().map(|f| f.facts.usages.len()).sum::<usize>()
    );
    facts
}
