//! Error types for project-level analysis.

use std::path::PathBuf;
use swiftdep::GraphError;
use thiserror::Error;

/// Errors that can occur while analyzing a project
///
/// Unreadable source files, unresolvable imports and cache misses are not errors:
/// they are recovered where they happen and only logged.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// Failed to read or write a path that the analysis cannot do without
    #[error("IO error at {path}: {source}")]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A configuration file exists but cannot be parsed
    #[error("Failed to load configuration from {path}: {message}")]
    Config {
        /// Configuration file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The project root does not exist or is not a directory
    #[error("Project root not found: {0}")]
    RootNotFound(PathBuf),

    /// Graph query, storage or serialization failure
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl ProjectError {
    /// Wrap an I/O error together with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for project operations
pub type ProjectResult<T> = Result<T, ProjectError>;
