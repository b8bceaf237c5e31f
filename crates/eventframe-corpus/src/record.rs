//! Corpus record

use eventframe_domain::Label;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One sentence of a corpus
///
/// Accepts the Polish source field names (`Zdanie`, `Etykieta`) on input.
/// Fields other than text and label are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    /// Sentence text
    #[serde(alias = "Zdanie")]
    pub text: String,

    /// Assigned label, if any
    #[serde(alias = "Etykieta", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,

    /// Any other fields of the source record
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CorpusRecord {
    /// Create an unlabeled record
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: None,
            extra: Map::new(),
        }
    }

    /// Create a labeled record
    pub fn labeled(text: impl Into<String>, label: Label) -> Self {
        Self {
            label: Some(label),
            ..Self::new(text)
        }
    }

    /// Copy of this record carrying `label`
    pub fn with_label(&self, label: Label) -> Self {
        Self {
            label: Some(label),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polish_field_names() {
        let record: CorpusRecord =
            serde_json::from_str(r#"{"Zdanie": "Spłonął dom.", "Etykieta": "KATASTROFA"}"#)
                .unwrap();
        assert_eq!(record.text, "Spłonął dom.");
        assert_eq!(record.label, Some(Label::Disaster));
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_extra_fields_preserved() {
        let record: CorpusRecord =
            serde_json::from_str(r#"{"text": "Zdanie.", "source": "pap", "id": 7}"#).unwrap();
        assert_eq!(record.label, None);

        let json = serde_json::to_value(record.with_label(Label::NoEvent)).unwrap();
        assert_eq!(json["source"], "pap");
        assert_eq!(json["id"], 7);
        assert_eq!(json["label"], "NO_EVENT");
    }

    #[test]
    fn test_unlabeled_record_omits_label() {
        let json = serde_json::to_value(CorpusRecord::new("Zdanie.")).unwrap();
        assert!(json.get("label").is_none());
    }
}
