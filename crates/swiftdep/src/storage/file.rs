//! Directory-backed storage: one file per key.
//!
//! Keys are hex-encoded into file names, so any byte string is a valid key.
//! Writes go to a temporary file that is renamed into place, which keeps a
//! half-written value from ever being read back.

use super::{KeyValue, StorageBackend};
use crate::error::{GraphError, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const ENTRY_EXTENSION: &str = "entry";

/// Persistent storage rooted at a caller-supplied directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) a store in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if the directory cannot be created.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            GraphError::storage(format!("Failed to create store at {}", dir.display()), Some(e))
        })?;
        debug!("Opened file store at {}", dir.display());
        Ok(Self { dir })
    }

    /// Directory holding the entries.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &[u8]) -> PathBuf {
        self.dir.join(format!("{}.{ENTRY_EXTENSION}", encode_key(key)))
    }
}

impl StorageBackend for FileBackend {
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let path = self.entry_path(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| {
                GraphError::storage(format!("Failed to write {}", path.display()), Some(e))
            })
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GraphError::storage(
                format!("Failed to read {}", path.display()),
                Some(e),
            )),
        }
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GraphError::storage(
                format!("Failed to delete {}", path.display()),
                Some(e),
            )),
        }
    }

    fn exists(&self, key: &[u8]) -> Result<bool> {
        Ok(self.entry_path(key).is_file())
    }

    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<KeyValue>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            GraphError::storage(format!("Failed to list {}", self.dir.display()), Some(e))
        })?;

        let mut results = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                GraphError::storage(format!("Failed to list {}", self.dir.display()), Some(e))
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            let Some(key) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(decode_key)
            else {
                continue;
            };
            if key.starts_with(prefix) {
                if let Some(value) = self.get(&key)? {
                    results.push((key, value));
                }
            }
        }

        results.sort();
        Ok(results)
    }

    fn flush(&mut self) -> Result<()> {
        // every put is already a completed rename
        Ok(())
    }
}

fn encode_key(key: &[u8]) -> String {
    key.iter().map(|b| format!("{b:02x}")).collect()
}

fn decode_key(name: &str) -> Option<Vec<u8>> {
    if name.len() % 2 != 0 {
        return None;
    }
    (0..name.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(name.get(i..i + 2)?, 16).ok())
        .collect()
}
