//! Error types for backend adapters.

use thiserror::Error;

/// Errors that can occur while probing or driving a backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdapterError {
    /// Backend is not installed or not reachable.
    #[error("Backend unsupported: {0}")]
    Unsupported(String),

    /// Backend ran and reported a failure.
    #[error("Backend error: {0}")]
    Backend(String),

    /// A driver subprocess broke the line protocol.
    #[error("Driver protocol violation: {0}")]
    Protocol(String),

    /// No backend is registered under this name.
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    /// Execution was cancelled cooperatively.
    #[error("Execution cancelled")]
    Cancelled,

    /// I/O error while talking to a subprocess or the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error while talking to a backend service.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
