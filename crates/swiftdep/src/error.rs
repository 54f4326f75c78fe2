//! Error types for swiftdep graph operations.
//!
//! All fallible operations return [`Result<T>`] with context-rich error messages.

use thiserror::Error;

/// Result type alias for swiftdep graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Error type for graph queries, storage and serialization.
///
/// Malformed source text never produces one of these: extraction simply finds nothing.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A query named a node that is not part of the graph
    #[error("Node not found in dependency graph: {node}")]
    NodeNotFound {
        /// File path or module marker that was requested
        node: String,
    },

    /// Storage backend error (file I/O, RocksDB, etc.)
    #[error("Storage error: {message}")]
    Storage {
        /// Detailed error message
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error details
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid operation (e.g., an edge without labels)
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of what went wrong
        message: String,
    },
}

impl GraphError {
    /// Create a node-not-found error for the given node name.
    pub fn node_not_found(node: impl Into<String>) -> Self {
        Self::NodeNotFound { node: node.into() }
    }

    /// Create a storage error from a message and optional source.
    pub fn storage<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create a serialization error from a message and optional source.
    pub fn serialization<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_not_found_error() {
        let err = GraphError::node_not_found("App/Main.swift");
        assert_eq!(
            err.to_string(),
            "Node not found in dependency graph: App/Main.swift"
        );
    }

    #[test]
    fn test_storage_error() {
        let err = GraphError::storage("Failed to write to disk", None::<std::io::Error>);
        assert_eq!(err.to_string(), "Storage error: Failed to write to disk");
    }

    #[test]
    fn test_serialization_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad bytes");
        let err = GraphError::serialization("Failed to decode graph", Some(io));
        assert_eq!(err.to_string(), "Serialization error: Failed to decode graph");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_operation_error() {
        let err = GraphError::InvalidOperation {
            message: "Edge needs at least one label".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid operation: Edge needs at least one label"
        );
    }
}
