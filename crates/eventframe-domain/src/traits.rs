//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the rule engine and the
//! services it consumes. Implementations live in other crates.

use crate::classification::LabelScores;
use crate::tree::DependencyTree;

/// One sentence of an annotated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceParse {
    /// Sentence text as it appears in the document
    pub text: String,

    /// Sentence-local dependency tree
    pub tree: DependencyTree,
}

/// Output of a linguistic annotator for a whole document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedDocument {
    /// Sentences in document order, non-overlapping
    pub sentences: Vec<SentenceParse>,
}

/// Trait for the external parser / named-entity recogniser
///
/// Implemented by the adapter layer (eventframe-nlp)
pub trait LinguisticAnnotator {
    /// Error type for annotation
    type Error;

    /// Segment a document and parse every sentence
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument, Self::Error>;
}

/// Trait for the external sentence classifier
///
/// Implemented by the adapter layer (eventframe-nlp)
pub trait SentenceClassifier {
    /// Error type for classification
    type Error;

    /// Score a sentence against every classifier label
    fn classify(&self, text: &str) -> Result<LabelScores, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (eventframe-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with structured output (if supported)
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}
