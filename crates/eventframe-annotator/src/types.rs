//! Types for batch annotation

use crate::error::AnnotatorError;
use eventframe_corpus::{CorpusRecord, LabelCounts};
use eventframe_domain::Label;
use serde::Deserialize;

/// One entry of an oracle response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OracleLabel {
    /// Text the oracle echoed back
    #[serde(default)]
    pub text: Option<String>,

    /// Raw label name
    #[serde(default)]
    pub label: Option<String>,
}

impl OracleLabel {
    /// Create a label entry
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            label: Some(label.into()),
        }
    }

    /// Closed-vocabulary label, `None` if missing or unknown
    pub fn resolve(&self) -> Option<Label> {
        self.label.as_deref().and_then(Label::parse)
    }
}

/// Result of one oracle call
#[derive(Debug)]
pub enum BatchOutcome {
    /// Parsed response, possibly shorter or longer than the batch
    Labeled(Vec<OracleLabel>),

    /// Call failed, timed out, or returned something unparseable
    Failed(AnnotatorError),
}

/// Summary of an annotation run
#[derive(Debug, Clone)]
pub struct AnnotationReport {
    /// Every labeled record, in input order
    pub records: Vec<CorpusRecord>,

    /// Label distribution of `records`
    pub counts: LabelCounts,

    /// Oracle calls made in this run
    pub oracle_calls: usize,

    /// Batches whose oracle call failed
    pub failed_batches: usize,

    /// Records taken over from an existing checkpoint
    pub resumed: usize,

    /// The last checkpoint write failed; the file lags behind `records`
    pub checkpoint_stale: bool,
}

impl AnnotationReport {
    /// Records labeled `ERROR_API`
    pub fn error_records(&self) -> usize {
        self.counts.get(Label::ErrorApi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_label() {
        assert_eq!(OracleLabel::new("a", "PRZESTEPSTWO").resolve(), Some(Label::Crime));
        assert_eq!(OracleLabel::new("a", "wypadek").resolve(), Some(Label::Accident));
        assert_eq!(OracleLabel::new("a", "INNE").resolve(), None);
        assert_eq!(OracleLabel::default().resolve(), None);
    }
}
