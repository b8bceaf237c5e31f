//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus error
    #[error(transparent)]
    Corpus(#[from] eventframe_corpus::CorpusError),

    /// Annotation pipeline error
    #[error("Annotation failed: {0}")]
    Annotator(#[from] eventframe_annotator::AnnotatorError),

    /// Sentence analysis error
    #[error("Analysis failed: {0}")]
    Extractor(#[from] eventframe_extractor::ExtractorError),

    /// Oracle provider setup error
    #[error("LLM provider error: {0}")]
    Llm(#[from] eventframe_llm::LlmError),

    /// NLP service setup error
    #[error("NLP service error: {0}")]
    Nlp(#[from] eventframe_nlp::NlpError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Background task failed
    #[error("Task error: {0}")]
    Task(String),
}
