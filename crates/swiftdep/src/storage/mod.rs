//! Storage backend abstractions and implementations.
//!
//! Storage only exists to persist analysis results between runs; the graph itself
//! lives in memory. Implementations:
//! - [`FileBackend`]: one file per key inside an injected directory
//! - [`MemoryBackend`]: in-memory storage for tests
//! - `RocksDBBackend`: RocksDB database (cargo feature `rocksdb-backend`)
//!
//! ## Design Philosophy
//!
//! - **Explicit Operations**: No automatic flushing or background magic
//! - **Fail Fast**: Operations return errors immediately, callers decide what is recoverable

mod file;
mod memory;
#[cfg(feature = "rocksdb-backend")]
mod rocksdb_backend;

pub use file::FileBackend;
pub use memory::MemoryBackend;
#[cfg(feature = "rocksdb-backend")]
pub use rocksdb_backend::RocksDBBackend;

use crate::error::Result;

/// Key-value pair for storage operations.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// Trait defining the storage backend interface.
///
/// All storage operations are explicit and return `Result` to handle failures.
pub trait StorageBackend: Send + Sync {
    /// Store a key-value pair, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`](crate::GraphError::Storage) if the write fails.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Retrieve a value by key.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`](crate::GraphError::Storage) if the read fails.
    /// Returns `Ok(None)` if the key doesn't exist.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Delete a key-value pair.
    ///
    /// Does not error if the key doesn't exist (idempotent).
    fn delete(&mut self, key: &[u8]) -> Result<()>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// All key-value pairs whose key starts with `prefix`, ordered by key.
    fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<KeyValue>>;

    /// Flush any buffered writes to durable storage.
    ///
    /// This is explicit - no automatic flushing happens.
    fn flush(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that storage backend trait is object-safe and can be used as trait object
    #[test]
    fn test_trait_object_safe() {
        fn _accept_trait_object(_backend: &dyn StorageBackend) {}
    }
}
