//! Error types for the data layer.

use thiserror::Error;

/// Errors that can occur in storage and cache operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Persisted value could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying storage I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend reported a failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}
