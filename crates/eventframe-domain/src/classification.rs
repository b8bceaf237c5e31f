//! Classification module - classifier output and annotated sentences

use crate::error::DomainError;
use crate::frame::EventFrame;
use crate::label::Label;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Confidence distribution over the six classifier labels
///
/// Keys are fixed to [`Label::CLASSES`]; labels missing from the source
/// mapping score 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LabelScores {
    scores: [f64; 6],
}

impl LabelScores {
    /// Build scores from `(label name, score)` pairs
    ///
    /// # Errors
    /// Returns error on a name outside the vocabulary or on `ERROR_API`
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut scores = [0.0; 6];
        for (name, score) in pairs {
            let name = name.as_ref();
            let label: Label = name.parse()?;
            let index = label
                .class_index()
                .ok_or_else(|| DomainError::NotAClass(name.to_string()))?;
            scores[index] = score;
        }
        Ok(Self { scores })
    }

    /// Score of a label (0.0 for the sentinel)
    pub fn get(&self, label: Label) -> f64 {
        label.class_index().map(|i| self.scores[i]).unwrap_or(0.0)
    }

    /// Labels with their scores, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Label, f64)> + '_ {
        Label::CLASSES.into_iter().zip(self.scores.iter().copied())
    }

    /// Highest-scoring label; ties go to the earlier label
    pub fn best(&self) -> (Label, f64) {
        let mut best = (Label::CLASSES[0], self.scores[0]);
        for (label, score) in self.iter().skip(1) {
            if score > best.1 {
                best = (label, score);
            }
        }
        best
    }

    /// Sum of all scores
    pub fn total(&self) -> f64 {
        self.scores.iter().sum()
    }
}

impl Serialize for LabelScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scores.len()))?;
        for (label, score) in self.iter() {
            map.serialize_entry(label.as_str(), &score)?;
        }
        map.end()
    }
}

/// Classifier verdict for one sentence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Sentence text
    pub text: String,

    /// Predicted label (argmax of `scores`)
    pub label: Label,

    /// Full distribution
    pub scores: LabelScores,
}

impl ClassificationResult {
    /// Build a result, predicting the argmax label
    pub fn new(text: impl Into<String>, scores: LabelScores) -> Self {
        let (label, _) = scores.best();
        Self {
            text: text.into(),
            label,
            scores,
        }
    }

    /// Confidence of the predicted label
    pub fn confidence(&self) -> f64 {
        self.scores.get(self.label)
    }
}

/// A sentence with its classification and extracted frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedSentence {
    /// Sentence text
    pub text: String,

    /// Classifier verdict
    pub classification: ClassificationResult,

    /// Extracted event frame
    pub frame: EventFrame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_label() {
        let scores = LabelScores::from_pairs([
            ("BRAK_ZDARZENIA", 0.1),
            ("PRZESTEPSTWO", 0.85),
            ("POLITYKA", 0.05),
        ])
        .unwrap();

        assert_eq!(scores.best(), (Label::Crime, 0.85));
        assert_eq!(scores.get(Label::Business), 0.0);
        assert!((scores.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_tie_goes_to_earlier_label() {
        let scores = LabelScores::from_pairs([("POLITICS", 0.5), ("NO_EVENT", 0.5)]).unwrap();
        assert_eq!(scores.best().0, Label::NoEvent);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(matches!(
            LabelScores::from_pairs([("SPORT", 1.0)]),
            Err(DomainError::UnknownLabel(_))
        ));
        assert!(matches!(
            LabelScores::from_pairs([("ERROR_API", 1.0)]),
            Err(DomainError::NotAClass(_))
        ));
    }

    #[test]
    fn test_classification_result() {
        let scores = LabelScores::from_pairs([("WYPADEK", 0.7), ("KATASTROFA", 0.3)]).unwrap();
        let result = ClassificationResult::new("Samochód wpadł do rowu.", scores);
        assert_eq!(result.label, Label::Accident);
        assert_eq!(result.confidence(), 0.7);
    }

    #[test]
    fn test_scores_serialize_all_classes() {
        let scores = LabelScores::from_pairs([("CRIME", 1.0)]).unwrap();
        let json = serde_json::to_value(scores).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 6);
        assert_eq!(json["CRIME"], 1.0);
        assert_eq!(json["NO_EVENT"], 0.0);
    }
}
