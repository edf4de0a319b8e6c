//! Error types for the engine.

use thiserror::Error;

/// Errors that can occur in controller and worker operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Alias payload failed validation.
    #[error("invalid alias: {0}")]
    Validation(String),

    /// Another alias already holds the requested code.
    #[error("an alias with code '{code}' already exists")]
    Conflict { code: String },

    /// No alias exists with the requested id.
    #[error("no alias found with id '{id}'")]
    NotFound { id: String },

    /// Navigation through the tabs collaborator failed.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Data layer error.
    #[error("store error: {0}")]
    Store(#[from] beacon_store::StoreError),
}
