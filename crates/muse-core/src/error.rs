//! Error types for muse-core

use thiserror::Error;

/// Result type alias using muse-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in muse-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected input (empty text/category, unknown category selection)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Quote not found
    #[error("Quote not found: {0}")]
    NotFound(String),

    /// Import payload that is not a JSON array of records
    #[error("Invalid import format: {0}")]
    Format(String),

    /// Nothing to pick from after category filtering
    #[error("No quotes available for {0}")]
    EmptyPool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
