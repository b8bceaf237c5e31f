//! Error types for corpus handling

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, writing or reshaping a corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Input file does not exist
    #[error("Corpus file not found: {0}")]
    NotFound(PathBuf),

    /// Filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not valid JSON or a record is malformed
    #[error("Invalid corpus JSON in {path}: {message}")]
    Json {
        /// File being read
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Top-level JSON value is not an array
    #[error("Corpus in {0} is not a JSON array")]
    NotAList(PathBuf),

    /// A record without a label reached an operation that needs labels
    #[error("Record {index} has no label")]
    Unlabeled {
        /// Position of the record
        index: usize,
    },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;
