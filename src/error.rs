//! Error types for nodecache
//!
//! All modules use `NodeCacheResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nodecache operations
pub type NodeCacheResult<T> = Result<T, NodeCacheError>;

/// All errors that can occur in nodecache
#[derive(Error, Debug)]
pub enum NodeCacheError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    // Cache errors
    #[error("Failed to clear cache at {path}: {source}")]
    CacheClear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write cache signature {path}: {source}")]
    SignatureWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read cache signature {path}: {source}")]
    SignatureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {path} from build output: {source}")]
    SlugReduction {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NodeCacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CacheClear { .. } | Self::SignatureWrite { .. } | Self::SignatureRead { .. } => {
                Some("Check that the cache directory is writable, or set NODE_MODULES_CACHE=false")
            }
            Self::SlugReduction { .. } => {
                Some("Check permissions on .npm and .cache/yarn in the build directory")
            }
            Self::ConfigInvalid { .. } => Some("Run: nodecache --config <path> to use another file"),
            Self::PathNotFound(_) => Some("Pass an existing directory with --build-dir"),
            _ => None,
        }
    }
}
