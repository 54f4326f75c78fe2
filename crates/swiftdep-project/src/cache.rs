//! On-disk result cache for built graphs.
//!
//! Entries are keyed by a fingerprint of the project root, the graph fidelity and
//! the newest modification time among a sample of the project's files. A missing or
//! unreadable entry is never an error: the caller just rebuilds.

use crate::builder::Fidelity;
use crate::discovery::ProjectFiles;
use crate::error::ProjectResult;
use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use swiftdep::{DependencyGraph, FileBackend, GraphError, StorageBackend};

/// Bumped whenever the stored representation or the builder's semantics change.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Key namespace for graph entries.
pub const KEY_PREFIX: &str = "graph:";

/// Number of files whose modification time feeds the fingerprint.
pub const MTIME_SAMPLE_SIZE: usize = 100;

/// Directory name under the home directory used by [`GraphCache::open_default`].
pub const DEFAULT_CACHE_DIR: &str = ".swift-dep-cache";

/// Cache key for a project in its current on-disk state.
///
/// The root, the fidelity and the discovery filters (ignore patterns and custom
/// extensions, normalized and sorted) are all part of the key, so listings of the
/// same tree filtered differently never share an entry. Only the first [`MTIME_SAMPLE_SIZE`] files (discovery order) are looked at, so
/// an edit further down the listing goes unnoticed until one of them changes.
pub fn fingerprint(project: &ProjectFiles, fidelity: Fidelity) -> String {
    let latest = project
        .files()
        .iter()
        .take(MTIME_SAMPLE_SIZE)
        .filter_map(|file| fs::metadata(&file.absolute).and_then(|m| m.modified()).ok())
        .filter_map(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|elapsed| elapsed.as_nanos())
        .max()
        .unwrap_or(0);

    let mut hasher = Sha256::new();
    hasher.update(CACHE_FORMAT_VERSION.to_le_bytes());
    hasher.update(project.root().to_string_lossy().as_bytes());
    hasher.update([0u8]);
    hasher.update(fidelity.as_str().as_bytes());
    for (tag, values) in [
        (b'i', project.ignore_patterns()),
        (b'x', project.custom_extensions()),
    ] {
        for value in values {
            hasher.update([0u8, tag]);
            hasher.update(value.as_bytes());
        }
    }
    hasher.update([0u8]);
    hasher.update(latest.to_le_bytes());
    format!("{:x}", hasher.finalize())
}

/// Graph cache over any [`StorageBackend`].
///
/// Nothing is flushed implicitly; call [`flush`](Self::flush) when done.
pub struct GraphCache<B: StorageBackend = FileBackend> {
    backend: B,
}

impl GraphCache<FileBackend> {
    /// File-backed cache in `dir`.
    ///
    /// # Errors
    ///
    /// [`ProjectError::Graph`](crate::ProjectError::Graph) if the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> ProjectResult<Self> {
        Ok(Self::with_backend(FileBackend::open(dir)?))
    }

    /// File-backed cache in `~/.swift-dep-cache`, or the working directory if
    /// there is no home directory.
    pub fn open_default() -> ProjectResult<Self> {
        let base = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::open(base.join(DEFAULT_CACHE_DIR))
    }
}

impl<B: StorageBackend> GraphCache<B> {
    /// Cache over an already-opened backend.
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    fn storage_key(key: &str) -> Vec<u8> {
        format!("{KEY_PREFIX}{key}").into_bytes()
    }

    /// Stored graph for `key`.
    ///
    /// Backend failures, undecodable entries and graphs violating the edge
    /// invariants are logged and reported as a miss.
    pub fn load(&self, key: &str) -> Option<DependencyGraph> {
        let bytes = match self.backend.get(&Self::storage_key(key)) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("Cache miss for {key}");
                return None;
            }
            Err(e) => {
                warn!("Cache read failed for {key}: {e}");
                return None;
            }
        };

        let graph: DependencyGraph = match serde_json::from_slice(&bytes) {
            Ok(graph) => graph,
            Err(e) => {
                warn!("Discarding unreadable cache entry {key}: {e}");
                return None;
            }
        };
        if let Err(e) = graph.check_invariants() {
            warn!("Discarding invalid cache entry {key}: {e}");
            return None;
        }

        debug!("Cache hit for {key} ({} edges)", graph.edge_count());
        Some(graph)
    }

    /// Store `graph` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Serialization or backend write failures.
    pub fn store(&mut self, key: &str, graph: &DependencyGraph) -> ProjectResult<()> {
        let bytes = serde_json::to_vec(graph)
            .map_err(|e| GraphError::serialization("Failed to encode graph", Some(e)))?;
        self.backend.put(&Self::storage_key(key), &bytes)?;
        Ok(())
    }

    /// Remove every graph entry, returning how many were deleted.
    ///
    /// # Errors
    ///
    /// Backend listing or delete failures.
    pub fn clear(&mut self) -> ProjectResult<usize> {
        let entries = self.backend.scan_prefix(KEY_PREFIX.as_bytes())?;
        for (key, _) in &entries {
            self.backend.delete(key)?;
        }
        info!("Cleared {} cached graphs", entries.len());
        Ok(entries.len())
    }

    /// Flush pending writes to the backend.
    ///
    /// # Errors
    ///
    /// Backend flush failures.
    pub fn flush(&mut self) -> ProjectResult<()> {
        self.backend.flush()?;
        Ok(())
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
