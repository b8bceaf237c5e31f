//! Error types for the NLP adapters

use eventframe_domain::DomainError;
use thiserror::Error;

/// Errors from the annotator and classifier adapters
#[derive(Error, Debug)]
pub enum NlpError {
    /// Network failure or undecodable body
    #[error("Transport error: {0}")]
    Transport(String),

    /// Service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// Parse output that does not describe a consistent document
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Parse output rejected by the domain model
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl From<reqwest::Error> for NlpError {
    fn from(err: reqwest::Error) -> Self {
        NlpError::Transport(err.to_string())
    }
}
