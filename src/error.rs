//! Error types for fswatch-hooks.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Result type alias for fswatch-hooks operations.
pub type Result<T> = std::result::Result<T, HookError>;

/// Errors that can occur while watching, dispatching or serving.
///
/// Only startup errors are fatal to the process. Per-recipient delivery
/// failures never surface here; they are logged by the delivery task.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// The watch root does not exist.
    #[error("Watch root does not exist: {}", .0.display())]
    WatchRootMissing(PathBuf),

    /// The watch root exists but is not a directory.
    #[error("Watch root is not a directory: {}", .0.display())]
    WatchRootNotDirectory(PathBuf),

    /// The filesystem event source failed to initialize or to watch the root.
    #[error("File watching error: {0}")]
    WatchError(String),

    /// A notification could not be encoded as JSON.
    #[error("Failed to serialize notification: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The outbound HTTP client could not be constructed.
    #[error("Delivery client error: {0}")]
    Delivery(String),

    /// The control API could not bind its listen address.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address the listener tried to bind
        addr: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Settings could not be loaded or deserialized.
    #[error("Failed to load settings: {0}")]
    ConfigError(String),

    /// Settings validation failed.
    #[error("Settings validation failed: {0}")]
    InvalidSetting(#[from] InvalidSetting),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A setting that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Field '{field}' is invalid: {reason}")]
pub struct InvalidSetting {
    /// Name of the offending setting
    pub field: String,
    /// What is wrong with its value
    pub reason: String,
}

impl InvalidSetting {
    /// Create an error for `field`.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
