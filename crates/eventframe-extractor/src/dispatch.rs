//! Sentence segmentation and per-sentence dispatch

use crate::config::ExtractorConfig;
use crate::engine::SlotExtractor;
use crate::error::ExtractorError;
use eventframe_domain::traits::{LinguisticAnnotator, SentenceClassifier};
use eventframe_domain::{AnnotatedSentence, ClassificationResult};
use tracing::{debug, info};

/// Which sentences a dispatch run emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchFilter {
    /// Every retained sentence
    #[default]
    All,
    /// Only sentences not predicted as `NO_EVENT`
    EventsOnly,
}

/// Splits documents into sentences and annotates each one
///
/// Holds injected annotator and classifier handles. Stateless between calls:
/// the same document always yields the same sequence, given deterministic
/// collaborators.
pub struct Dispatcher<A, C>
where
    A: LinguisticAnnotator,
    C: SentenceClassifier,
{
    annotator: A,
    classifier: C,
    extractor: SlotExtractor,
    filter: DispatchFilter,
}

impl<A, C> Dispatcher<A, C>
where
    A: LinguisticAnnotator,
    C: SentenceClassifier,
    A::Error: std::fmt::Display,
    C::Error: std::fmt::Display,
{
    /// Create a new Dispatcher
    pub fn new(annotator: A, classifier: C, config: ExtractorConfig) -> Self {
        Self {
            annotator,
            classifier,
            extractor: SlotExtractor::new(config),
            filter: DispatchFilter::All,
        }
    }

    /// Restrict which sentences are emitted
    pub fn with_filter(mut self, filter: DispatchFilter) -> Self {
        self.filter = filter;
        self
    }

    /// The configuration in use
    pub fn config(&self) -> &ExtractorConfig {
        self.extractor.config()
    }

    #[cfg(test)]
    pub(crate) fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Annotate every sentence of a document, in document order
    ///
    /// # Errors
    ///
    /// Returns error if the document is too long or if the annotator or the
    /// classifier fails; no sentence-level retries are attempted.
    pub fn dispatch(&self, document: &str) -> Result<Vec<AnnotatedSentence>, ExtractorError> {
        let config = self.extractor.config();
        let length = document.chars().count();
        if length > config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, config.max_text_length));
        }

        let parsed = self
            .annotator
            .annotate(document)
            .map_err(|e| ExtractorError::Annotator(e.to_string()))?;

        info!("Annotator found {} sentences", parsed.sentences.len());

        let mut annotated = Vec::with_capacity(parsed.sentences.len());
        for (idx, sentence) in parsed.sentences.iter().enumerate() {
            let text = sentence.text.trim();
            if text.is_empty() || text.chars().count() < config.min_sentence_chars {
                debug!("Skipping sentence {}: too short", idx);
                continue;
            }

            let scores = self
                .classifier
                .classify(text)
                .map_err(|e| ExtractorError::Classifier(e.to_string()))?;
            let classification = ClassificationResult::new(text, scores);

            if self.filter == DispatchFilter::EventsOnly && !classification.label.is_event() {
                debug!("Skipping sentence {}: no event", idx);
                continue;
            }

            let frame = self.extractor.extract(&sentence.tree);

            annotated.push(AnnotatedSentence {
                text: text.to_string(),
                classification,
                frame,
            });
        }

        info!("Dispatch complete: {} sentences annotated", annotated.len());

        Ok(annotated)
    }
}
