//! Error types for the annotation pipeline

use eventframe_corpus::CorpusError;
use thiserror::Error;

/// Errors that can occur during annotation
#[derive(Error, Debug)]
pub enum AnnotatorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Oracle call exceeded the batch timeout
    #[error("Batch timeout")]
    Timeout,

    /// Oracle response could not be interpreted
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// Input or checkpoint corpus error
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// Existing checkpoint does not match the input corpus
    #[error("Checkpoint does not match input at record {index}")]
    ResumeMismatch {
        /// First record that differs
        index: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AnnotatorError {
    fn from(e: serde_json::Error) -> Self {
        AnnotatorError::InvalidFormat(e.to_string())
    }
}
