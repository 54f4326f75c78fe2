//! Edge construction: turns per-file facts into a [`DependencyGraph`].
//!
//! Two fidelities exist. [`Fidelity::Shallow`] only draws edges that some symbol
//! usage demonstrates; [`Fidelity::Extended`] additionally turns every import into an
//! edge. Both share the cross-language rule in
//! [`GraphBuilder::is_valid_dependency`].

use crate::bridging::BridgingResolver;
use crate::collector::{self, FileFacts, Parsers};
use crate::discovery::ProjectFiles;
use crate::index::DeclarationIndex;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use swiftdep::{is_module, DependencyGraph, IMPORT_LABEL, MODULE_IMPORT_LABEL};
use swiftdep_parser_api::Language;

/// How much evidence an edge needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fidelity {
    /// Edges from resolved symbol usages only
    #[default]
    Shallow,
    /// Symbol edges plus every declared import
    Extended,
}

impl Fidelity {
    /// Lowercase name, as used in cache keys and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Fidelity::Shallow => "shallow",
            Fidelity::Extended => "extended",
        }
    }
}

impl fmt::Display for Fidelity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only inputs of one graph construction.
pub struct GraphBuilder<'a> {
    project: &'a ProjectFiles,
    index: &'a DeclarationIndex,
    bridging: &'a BridgingResolver,
    facts: &'a [FileFacts],
}

impl<'a> GraphBuilder<'a> {
    /// Assemble a builder from already-collected inputs.
    pub fn new(
        project: &'a ProjectFiles,
        index: &'a DeclarationIndex,
        bridging: &'a BridgingResolver,
        facts: &'a [FileFacts],
    ) -> Self {
        Self {
            project,
            index,
            bridging,
            facts,
        }
    }

    /// Cross-language rule for an edge `source -> target`.
    ///
    /// - a module endpoint is always fine
    /// - Swift to Swift and Objective-C to Objective-C are always fine
    /// - Swift to Objective-C needs the target imported by the bridging header, or
    ///   any bridging header at all
    /// - Objective-C never sees Swift
    pub fn is_valid_dependency(&self, source: &str, target: &str) -> bool {
        if is_module(source) || is_module(target) {
            return true;
        }

        match (self.project.language_of(source), self.project.language_of(target)) {
            (Some(Language::Swift), Some(Language::ObjC)) => {
                let basename = target.rsplit('/').next().unwrap_or(target);
                self.bridging.imports_basename(basename) || self.bridging.has_header()
            }
            (Some(Language::ObjC), Some(Language::Swift)) => false,
            _ => true,
        }
    }

    /// Build the graph at the requested fidelity.
    pub fn build(&self, fidelity: Fidelity) -> DependencyGraph {
        let mut graph = DependencyGraph::new();

        match fidelity {
            Fidelity::Shallow => {
                self.add_symbol_edges(&mut graph);
                if !self.bridging.files().is_empty() {
                    self.add_bridging_edges(&mut graph);
                }
                self.add_demonstrated_module_edges(&mut graph);
            }
            Fidelity::Extended => {
                self.add_import_edges(&mut graph);
                self.add_symbol_edges(&mut graph);
            }
        }

        debug!(
            "Built {fidelity} graph: {} sources, {} edges",
            graph.source_count(),
            graph.edge_count()
        );
        graph
    }

    fn add_symbol_edges(&self, graph: &mut DependencyGraph) {
        for file in self.facts {
            let source = file.path();
            for usage in &file.facts.usages {
                let Some(target) = self.index.resolve(usage) else {
                    continue;
                };
                if target == source {
                    continue;
                }
                if self.is_valid_dependency(source, target) {
                    graph.add_edge(source, target, usage.label());
                } else {
                    trace!("Rejected {source} -> {target} ({})", usage.label());
                }
            }
        }
    }

    /// Swift usages of anything declared in a bridged file, whoever owns the name.
    fn add_bridging_edges(&self, graph: &mut DependencyGraph) {
        for file in self.facts {
            if file.file.language != Language::Swift {
                continue;
            }
            for usage in &file.facts.usages {
                for bridged in self.bridging.files() {
                    if self.index.declares(bridged, usage.base()) {
                        graph.add_edge(file.path(), bridged, usage.label());
                    }
                }
            }
        }
    }

    /// Module imports, kept only when the file has some bare symbol usage.
    fn add_demonstrated_module_edges(&self, graph: &mut DependencyGraph) {
        for file in self.facts {
            if file.module_imports.is_empty() || !file.facts.has_bare_usage() {
                continue;
            }
            for module in &file.module_imports {
                graph.add_edge(file.path(), module, MODULE_IMPORT_LABEL);
            }
        }
    }

    fn add_import_edges(&self, graph: &mut DependencyGraph) {
        for file in self.facts {
            let source = file.path();
            for module in &file.module_imports {
                graph.add_edge(source, module, MODULE_IMPORT_LABEL);
            }
            for target in &file.local_imports {
                if self.is_valid_dependency(source, target) {
                    graph.add_edge(source, target, IMPORT_LABEL);
                } else {
                    trace!("Rejected import {source} -> {target}");
                }
            }
        }
    }
}

/// Build the declaration index from collected facts, in file order.
pub fn build_index(facts: &[FileFacts]) -> DeclarationIndex {
    let mut index = DeclarationIndex::new();
    for file in facts {
        index.insert(file.path(), file.facts.declarations.iter().cloned());
    }
    if !index.collisions().is_empty() {
        debug!("{} symbol collisions resolved by first declaration", index.collisions().len());
    }
    index
}

/// Full pipeline over a discovered project: collect, index, detect bridging, build.
pub fn build_graph(project: &ProjectFiles, fidelity: Fidelity) -> DependencyGraph {
    let started = Instant::now();
    let parsers = Parsers::new();

    let facts = collector::collect(project, &parsers);
    let index = build_index(&facts);
    let bridging = BridgingResolver::detect(project, &parsers.objc);
    let graph = GraphBuilder::new(project, &index, &bridging, &facts).build(fidelity);

    info!(
        "Analyzed {} files ({} symbols) into {} edges in {:?}",
        project.len(),
        index.symbol_count(),
        graph.edge_count(),
        started.elapsed()
    );
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::SourceFile;
    use std::path::PathBuf;

    struct Fixture {
        project: ProjectFiles,
        facts: Vec<FileFacts>,
    }

    impl Fixture {
        fn new(files: &[(&str, &str)]) -> Self {
            let sources: Vec<SourceFile> = files
                .iter()
                .map(|(path, _)| SourceFile {
                    path: path.to_string(),
                    absolute: PathBuf::from(path),
                    language: Language::from_path(path).unwrap(),
                })
                .collect();
            let project = ProjectFiles::from_files("/project", sources);
            let parsers = Parsers::new();
            let facts = files
                .iter()
                .map(|(path, text)| {
                    FileFacts::extract(project.get(path).unwrap(), text, &project, &parsers)
                })
                .collect();
            Self { project, facts }
        }

        fn build(&self, bridging: &BridgingResolver, fidelity: Fidelity) -> DependencyGraph {
            let index = build_index(&self.facts);
            GraphBuilder::new(&self.project, &index, bridging, &self.facts).build(fidelity)
        }
    }

    #[test]
    fn test_objc_message_send_edge() {
        let fixture = Fixture::new(&[
            ("Cache.h", "@interface ImageCache : NSObject\n@end\n"),
            ("Feed.m", "- (void)load {\n    [ImageCache sharedCache];\n}\n"),
        ]);
        let graph = fixture.build(&BridgingResolver::none(), Fidelity::Shallow);

        let labels = graph.labels("Feed.m", "Cache.h").unwrap();
        assert!(labels.iter().any(|label| label.starts_with("ImageCache")));
    }

    #[test]
    fn test_objc_never_depends_on_swift() {
        let fixture = Fixture::new(&[
            ("Feed.swift", "class FeedStore {\n}\n"),
            ("Legacy.m", "- (void)run {\n    [FeedStore refreshAll];\n}\n"),
        ]);
        for fidelity in [Fidelity::Shallow, Fidelity::Extended] {
            let graph = fixture.build(&BridgingResolver::none(), fidelity);
            assert!(!graph.contains_edge("Legacy.m", "Feed.swift"));
        }
    }

    #[test]
    fn test_swift_to_objc_needs_bridging_header() {
        let fixture = Fixture::new(&[
            ("Cache.h", "@interface ImageCache : NSObject\n@end\n"),
            ("Feed.swift", "let cache: ImageCache = ImageCache()\n"),
        ]);

        let graph = fixture.build(&BridgingResolver::none(), Fidelity::Shallow);
        assert!(!graph.contains_edge("Feed.swift", "Cache.h"));

        let parsers = Parsers::new();
        let bridging = BridgingResolver::from_header(
            PathBuf::from("/project/App-Bridging-Header.h"),
            "#import \"Cache.h\"\n",
            &fixture.project,
            &parsers.objc,
        );
        let graph = fixture.build(&bridging, Fidelity::Shallow);
        assert!(graph.contains_edge("Feed.swift", "Cache.h"));
    }

    #[test]
    fn test_module_edges_need_bare_usage_in_shallow_mode() {
        let fixture = Fixture::new(&[
            ("Quiet.swift", "import Foundation\n"),
            ("Busy.swift", "import Foundation\nlet formatter: Formatter = Formatter()\n"),
        ]);

        let shallow = fixture.build(&BridgingResolver::none(), Fidelity::Shallow);
        assert!(!shallow.contains_node("Quiet.swift"));
        assert_eq!(
            shallow.labels("Busy.swift", "module:Foundation").unwrap().iter().next().unwrap(),
            MODULE_IMPORT_LABEL
        );

        let extended = fixture.build(&BridgingResolver::none(), Fidelity::Extended);
        assert!(extended.contains_edge("Quiet.swift", "module:Foundation"));
    }

    #[test]
    fn test_extended_mode_adds_import_edges() {
        let fixture = Fixture::new(&[
            ("Util.h", "void Helper(void);\n"),
            ("Feed.m", "#import \"Util.h\"\n"),
        ]);

        let shallow = fixture.build(&BridgingResolver::none(), Fidelity::Shallow);
        assert!(!shallow.contains_edge("Feed.m", "Util.h"));

        let extended = fixture.build(&BridgingResolver::none(), Fidelity::Extended);
        let labels = extended.labels("Feed.m", "Util.h").unwrap();
        assert!(labels.contains(IMPORT_LABEL));
    }

    #[test]
    fn test_validity_rule_for_modules_and_unknowns() {
        let fixture = Fixture::new(&[("Feed.m", ""), ("Feed.swift", "")]);
        let index = build_index(&fixture.facts);
        let bridging = BridgingResolver::none();
        let builder = GraphBuilder::new(&fixture.project, &index, &bridging, &fixture.facts);

        assert!(builder.is_valid_dependency("Feed.m", "@module:UIKit"));
        assert!(builder.is_valid_dependency("Feed.swift", "module:Foundation"));
        assert!(!builder.is_valid_dependency("Feed.m", "Feed.swift"));
        assert!(!builder.is_valid_dependency("Feed.swift", "Feed.m"));
    }

    #[test]
    fn test_fidelity_names() {
        assert_eq!(Fidelity::default(), Fidelity::Shallow);
        assert_eq!(Fidelity::Extended.to_string(), "extended");
    }
}
