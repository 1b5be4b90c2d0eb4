//! Error types for the Wikidex library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`WikidexError`] enum.

use std::io;

use thiserror::Error;

/// The main error type for Wikidex operations.
#[derive(Error, Debug)]
pub enum WikidexError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Index-related errors (open, format, corruption)
    #[error("Index error: {0}")]
    Index(String),

    /// Analysis-related errors (tokenization, stemming)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query-related errors
    #[error("Query error: {0}")]
    Query(String),

    /// Document source errors (connection, malformed rows)
    #[error("Source error: {0}")]
    Source(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with WikidexError.
pub type Result<T> = std::result::Result<T, WikidexError>;

impl WikidexError {
    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        WikidexError::Index(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        WikidexError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        WikidexError::Query(msg.into())
    }

    /// Create a new source error.
    pub fn source<S: Into<String>>(msg: S) -> Self {
        WikidexError::Source(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        WikidexError::Other(msg.into())
    }
}
