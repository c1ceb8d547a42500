//! Error types for sift
//!
//! This module defines all error types used throughout the search engine.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Absence is not an error: removing an unknown document and reading the
//! term frequencies of an unknown document both succeed with no effect.

use crate::types::DocumentId;
use std::io;
use thiserror::Error;

/// Result type alias for sift operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the search engine
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied input was rejected before any state changed
    ///
    /// Raised for negative or already-used document ids, control
    /// characters in document, query or stop-word text, malformed
    /// minus-words (`-` alone or `--word`) and zero page sizes.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Document id is not present in the index
    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// Configuration could not be parsed or failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (reading a configuration file)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl Error {
    /// Create an `InvalidArgument` error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create a `Config` error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Check whether this error rejected caller input
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
