//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while dispatching a document
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Linguistic annotator error
    #[error("Annotator error: {0}")]
    Annotator(String),

    /// Sentence classifier error
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
