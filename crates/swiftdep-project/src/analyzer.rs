//! High-level entry point tying configuration, discovery, caching and building together.

use crate::builder::{self, Fidelity};
use crate::cache::{fingerprint, GraphCache};
use crate::config::AnalyzerConfig;
use crate::discovery::{find_project_root, ProjectFiles};
use crate::error::ProjectResult;
use log::{info, warn};
use std::path::Path;
use swiftdep::{CouplingMetrics, DependencyGraph, FileBackend, StorageBackend};

/// One analysis session over a project.
///
/// The file listing is taken once at construction; graphs built later reflect the
/// files' contents at build time.
///
/// # Example
///
/// ```no_run
/// use swiftdep_project::{AnalyzerConfig, DependencyAnalyzer};
///
/// let mut analyzer = DependencyAnalyzer::new("MyApp", AnalyzerConfig::default())?;
/// let graph = analyzer.build_graph();
/// for cycle in analyzer.cycles(&graph) {
///     println!("{}", cycle.join(" -> "));
/// }
/// # Ok::<(), swiftdep_project::ProjectError>(())
/// ```
pub struct DependencyAnalyzer<B: StorageBackend = FileBackend> {
    config: AnalyzerConfig,
    project: ProjectFiles,
    cache: Option<GraphCache<B>>,
}

impl DependencyAnalyzer<FileBackend> {
    /// Validate `config` and discover the files under `root`. No cache is attached.
    ///
    /// # Errors
    ///
    /// [`ProjectError::InvalidConfig`](crate::ProjectError::InvalidConfig) or
    /// [`ProjectError::RootNotFound`](crate::ProjectError::RootNotFound).
    pub fn new(root: impl AsRef<Path>, config: AnalyzerConfig) -> ProjectResult<Self> {
        config.validate()?;
        let project = ProjectFiles::discover(
            root.as_ref(),
            &config.custom_extensions,
            &config.ignore_patterns,
        )?;
        info!(
            "Discovered {} source files under {}",
            project.len(),
            project.root().display()
        );
        Ok(Self {
            config,
            project,
            cache: None,
        })
    }

    /// Like [`new`](Self::new), but starting from any file or directory inside the
    /// project and walking up to its root.
    pub fn for_path(path: impl AsRef<Path>, config: AnalyzerConfig) -> ProjectResult<Self> {
        Self::new(find_project_root(path), config)
    }

    /// Attach the default file cache when the configuration enables caching.
    ///
    /// A cache that cannot be opened is logged and skipped.
    pub fn with_default_cache(self) -> Self {
        if !self.config.cache_enabled {
            return self;
        }
        match GraphCache::open_default() {
            Ok(cache) => self.with_cache(cache),
            Err(e) => {
                warn!("Result cache unavailable: {e}");
                self
            }
        }
    }
}

impl<B: StorageBackend> DependencyAnalyzer<B> {
    /// Use `cache` for [`build_graph`](Self::build_graph).
    pub fn with_cache<C: StorageBackend>(self, cache: GraphCache<C>) -> DependencyAnalyzer<C> {
        DependencyAnalyzer {
            config: self.config,
            project: self.project,
            cache: Some(cache),
        }
    }

    /// Discovered files.
    pub fn project(&self) -> &ProjectFiles {
        &self.project
    }

    /// Effective configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Attached cache, if any.
    pub fn cache(&self) -> Option<&GraphCache<B>> {
        self.cache.as_ref()
    }

    /// Graph fidelity from the configuration.
    pub fn fidelity(&self) -> Fidelity {
        self.config.fidelity()
    }

    /// Build the dependency graph, going through the cache when one is attached and
    /// enabled. Cache failures only cost a rebuild.
    pub fn build_graph(&mut self) -> DependencyGraph {
        let fidelity = self.fidelity();
        let cache = match self.cache.as_mut() {
            Some(cache) if self.config.cache_enabled => cache,
            _ => return builder::build_graph(&self.project, fidelity),
        };

        let key = fingerprint(&self.project, fidelity);
        if let Some(graph) = cache.load(&key) {
            info!("Using cached {fidelity} graph for {}", self.project.root().display());
            return graph;
        }

        let graph = builder::build_graph(&self.project, fidelity);
        if let Err(e) = cache.store(&key, &graph) {
            warn!("Failed to cache graph: {e}");
        }
        graph
    }

    /// Project files absent from `graph`.
    pub fn orphans(&self, graph: &DependencyGraph) -> Vec<String> {
        graph.find_orphan_files(self.project.paths())
    }

    /// Everything `node` reaches; modules follow the `include_modules` setting.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`](swiftdep::GraphError::NodeNotFound) wrapped in
    /// [`ProjectError::Graph`](crate::ProjectError::Graph).
    pub fn closure(&self, graph: &DependencyGraph, node: &str) -> ProjectResult<Vec<String>> {
        Ok(graph.transitive_closure(node, self.config.include_modules)?)
    }

    /// Every simple path from `from` to `to`, bounded by the configured `max_depth`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`](swiftdep::GraphError::NodeNotFound) wrapped in
    /// [`ProjectError::Graph`](crate::ProjectError::Graph).
    pub fn paths(
        &self,
        graph: &DependencyGraph,
        from: &str,
        to: &str,
    ) -> ProjectResult<Vec<Vec<String>>> {
        Ok(graph.find_all_paths(from, to, self.config.max_depth)?)
    }

    /// Dependency cycles in `graph`.
    pub fn cycles(&self, graph: &DependencyGraph) -> Vec<Vec<String>> {
        graph.find_cycles()
    }

    /// Coupling report for `graph`.
    pub fn metrics(&self, graph: &DependencyGraph) -> CouplingMetrics {
        graph.coupling_metrics()
    }
}
