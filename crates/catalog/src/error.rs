//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading or validating the catalog graph
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Data file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// An edge points at a node that doesn't exist
    #[error("Missing reference: {entity} {key}")]
    MissingReference { entity: String, key: String },

    /// A record breaks the data invariants (e.g. no title)
    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    /// Graph validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
