//! Error types for store operations.

use thiserror::Error;

/// Errors that can occur when reading from a record store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error reaching the backing medium.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The backing data could not be parsed as records.
    #[error("record parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Other backend failure.
    #[error("{0}")]
    Other(String),
}
