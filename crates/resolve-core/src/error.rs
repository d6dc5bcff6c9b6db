//! Error types for resolve-core

use thiserror::Error;

/// Result type alias using resolve-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in resolve-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Resolution not found
    #[error("Resolution with id:{0} not found")]
    NotFound(String),

    /// Opaque store fault while creating a resolution
    #[error("Failed to create resolution: {0}")]
    CreationFailed(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
