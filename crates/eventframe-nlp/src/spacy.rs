//! Adapter over spaCy's `Doc.to_json()` output
//!
//! spaCy reports every offset in characters and every head as a
//! document-level token index. `into_document` cuts the document into
//! sentences and rebases heads and entity spans onto sentence-local token
//! indices, producing one [`DependencyTree`] per sentence.

use crate::error::NlpError;
use eventframe_domain::{
    AnnotatedDocument, DependencyTree, EntitySpan, Relation, SentenceParse, Token,
};
use serde::Deserialize;

/// A serialized spaCy document
#[derive(Debug, Clone, Deserialize)]
pub struct SpacyDoc {
    /// Full document text
    pub text: String,

    /// Tokens in document order
    #[serde(default)]
    pub tokens: Vec<SpacyToken>,

    /// Named entities (character offsets)
    #[serde(default)]
    pub ents: Vec<SpacyEntity>,

    /// Sentence boundaries (character offsets); absent when the pipeline
    /// has no sentence segmentation
    #[serde(default)]
    pub sents: Vec<SpacySpan>,
}

/// One token of a serialized spaCy document
#[derive(Debug, Clone, Deserialize)]
pub struct SpacyToken {
    /// Document-level token index
    pub id: usize,
    /// Start character offset
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
    /// Lemma; falls back to the surface text when missing
    #[serde(default)]
    pub lemma: Option<String>,
    /// Dependency label
    #[serde(default)]
    pub dep: String,
    /// Document-level head index (self for the root)
    pub head: usize,
}

/// A named entity of a serialized spaCy document
#[derive(Debug, Clone, Deserialize)]
pub struct SpacyEntity {
    /// Start character offset
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
    /// Entity type
    pub label: String,
}

/// A sentence boundary
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SpacySpan {
    /// Start character offset
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
}

/// Character-offset slicing over a UTF-8 string
struct CharIndex<'a> {
    text: &'a str,
    bytes: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut bytes: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        bytes.push(text.len());
        Self { text, bytes }
    }

    fn chars(&self) -> usize {
        self.bytes.len() - 1
    }

    fn slice(&self, start: usize, end: usize) -> Result<&'a str, NlpError> {
        if start > end || end > self.chars() {
            return Err(NlpError::InvalidDocument(format!(
                "offsets {}..{} outside text of {} chars",
                start,
                end,
                self.chars()
            )));
        }
        Ok(&self.text[self.bytes[start]..self.bytes[end]])
    }
}

impl SpacyDoc {
    /// Parse a document from its JSON form
    pub fn from_json(json: &str) -> Result<Self, NlpError> {
        serde_json::from_str(json)
            .map_err(|e| NlpError::InvalidDocument(format!("Failed to parse spaCy JSON: {}", e)))
    }

    /// Convert into per-sentence dependency trees
    ///
    /// # Errors
    /// Returns error on offsets outside the text, tokens out of order, heads
    /// pointing outside their sentence, or entity spans that do not align
    /// with token boundaries
    pub fn into_document(self) -> Result<AnnotatedDocument, NlpError> {
        let index = CharIndex::new(&self.text);

        for (position, token) in self.tokens.iter().enumerate() {
            if token.id != position {
                return Err(NlpError::InvalidDocument(format!(
                    "token {} found at position {}",
                    token.id, position
                )));
            }
            index.slice(token.start, token.end)?;
        }

        let bounds = if self.sents.is_empty() {
            vec![SpacySpan {
                start: 0,
                end: index.chars(),
            }]
        } else {
            self.sents.clone()
        };

        let mut sentences = Vec::with_capacity(bounds.len());
        for bound in bounds {
            let members: Vec<&SpacyToken> = self
                .tokens
                .iter()
                .filter(|t| t.start >= bound.start && t.end <= bound.end)
                .collect();

            let text = index.slice(bound.start, bound.end)?.to_string();
            let tree = match members.first() {
                Some(first) => self.sentence_tree(&index, first.id, &members, bound)?,
                None => DependencyTree::default(),
            };

            sentences.push(SentenceParse { text, tree });
        }

        Ok(AnnotatedDocument { sentences })
    }

    fn sentence_tree(
        &self,
        index: &CharIndex<'_>,
        offset: usize,
        members: &[&SpacyToken],
        bound: SpacySpan,
    ) -> Result<DependencyTree, NlpError> {
        let local = |id: usize| -> Option<usize> {
            id.checked_sub(offset).filter(|&i| i < members.len())
        };

        let mut tokens = Vec::with_capacity(members.len());
        for token in members {
            let text = index.slice(token.start, token.end)?;
            let head = local(token.head).ok_or_else(|| {
                NlpError::InvalidDocument(format!(
                    "token {} has head {} outside its sentence",
                    token.id, token.head
                ))
            })?;
            let lemma = token.lemma.clone().unwrap_or_else(|| text.to_string());
            tokens.push(Token::new(text, lemma, Relation::parse(&token.dep), Some(head)));
        }

        let mut entities = Vec::new();
        for ent in self
            .ents
            .iter()
            .filter(|e| e.start >= bound.start && e.end <= bound.end)
        {
            let start = members.iter().position(|t| t.start == ent.start);
            let end = members.iter().position(|t| t.end == ent.end);
            match (start, end) {
                (Some(start), Some(end)) if start <= end => {
                    let text = index.slice(ent.start, ent.end)?;
                    entities.push(EntitySpan::new(&ent.label, start, end + 1, text));
                }
                _ => {
                    return Err(NlpError::InvalidDocument(format!(
                        "entity {}..{} does not align with tokens",
                        ent.start, ent.end
                    )));
                }
            }
        }

        Ok(DependencyTree::new(tokens, entities)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventframe_domain::Relation;

    // "Wczoraj w Krakowie policja zatrzymała złodzieja. Nic więcej."
    const DOC: &str = r#"{
        "text": "Wczoraj w Krakowie policja zatrzymała złodzieja. Nic więcej.",
        "ents": [{"start": 10, "end": 18, "label": "placeName"}],
        "sents": [{"start": 0, "end": 48}, {"start": 49, "end": 60}],
        "tokens": [
            {"id": 0, "start": 0, "end": 7, "lemma": "wczoraj", "dep": "advmod", "head": 4},
            {"id": 1, "start": 8, "end": 9, "lemma": "w", "dep": "case", "head": 2},
            {"id": 2, "start": 10, "end": 18, "lemma": "Kraków", "dep": "obl", "head": 4},
            {"id": 3, "start": 19, "end": 26, "lemma": "policja", "dep": "nsubj", "head": 4},
            {"id": 4, "start": 27, "end": 37, "lemma": "zatrzymać", "dep": "ROOT", "head": 4},
            {"id": 5, "start": 38, "end": 47, "lemma": "złodziej", "dep": "obj", "head": 4},
            {"id": 6, "start": 47, "end": 48, "lemma": ".", "dep": "punct", "head": 4},
            {"id": 7, "start": 49, "end": 52, "lemma": "nic", "dep": "ROOT", "head": 7},
            {"id": 8, "start": 53, "end": 59, "lemma": "więcej", "dep": "advmod", "head": 7},
            {"id": 9, "start": 59, "end": 60, "lemma": ".", "dep": "punct", "head": 7}
        ]
    }"#;

    #[test]
    fn test_sentences_split_and_rebased() {
        let doc = SpacyDoc::from_json(DOC).unwrap().into_document().unwrap();
        assert_eq!(doc.sentences.len(), 2);

        let first = &doc.sentences[0];
        assert_eq!(first.text, "Wczoraj w Krakowie policja zatrzymała złodzieja.");
        assert_eq!(first.tree.len(), 7);
        assert_eq!(first.tree.root(), Some(4));
        assert_eq!(first.tree.children(4), &[0, 2, 3, 5, 6]);

        let second = &doc.sentences[1];
        assert_eq!(second.text, "Nic więcej.");
        assert_eq!(second.tree.root(), Some(0));
        assert_eq!(second.tree.token(1).unwrap().head, Some(0));
    }

    #[test]
    fn test_multibyte_offsets_are_characters() {
        let doc = SpacyDoc::from_json(DOC).unwrap().into_document().unwrap();
        let tree = &doc.sentences[0].tree;
        assert_eq!(tree.token(4).unwrap().text, "zatrzymała");
        assert_eq!(tree.token(5).unwrap().text, "złodzieja");
        assert_eq!(tree.token(5).unwrap().relation, Relation::Object);
    }

    #[test]
    fn test_entities_mapped_to_tokens() {
        let doc = SpacyDoc::from_json(DOC).unwrap().into_document().unwrap();
        let tree = &doc.sentences[0].tree;
        assert_eq!(tree.entities().len(), 1);
        let ent = &tree.entities()[0];
        assert_eq!((ent.start, ent.end), (2, 3));
        assert_eq!(ent.text, "Krakowie");
        assert_eq!(tree.token(2).unwrap().entity_type.as_deref(), Some("placeName"));
        assert!(doc.sentences[1].tree.entities().is_empty());
    }

    #[test]
    fn test_missing_sents_is_one_sentence() {
        let json = r#"{
            "text": "Padał deszcz.",
            "tokens": [
                {"id": 0, "start": 0, "end": 5, "lemma": "padać", "dep": "ROOT", "head": 0},
                {"id": 1, "start": 6, "end": 12, "lemma": "deszcz", "dep": "nsubj", "head": 0},
                {"id": 2, "start": 12, "end": 13, "dep": "punct", "head": 0}
            ]
        }"#;
        let doc = SpacyDoc::from_json(json).unwrap().into_document().unwrap();
        assert_eq!(doc.sentences.len(), 1);
        assert_eq!(doc.sentences[0].text, "Padał deszcz.");
        assert_eq!(doc.sentences[0].tree.token(2).unwrap().lemma, ".");
    }

    #[test]
    fn test_head_outside_sentence_rejected() {
        let json = r#"{
            "text": "A b. C d.",
            "sents": [{"start": 0, "end": 4}, {"start": 5, "end": 9}],
            "tokens": [
                {"id": 0, "start": 0, "end": 1, "dep": "ROOT", "head": 0},
                {"id": 1, "start": 2, "end": 3, "dep": "obj", "head": 2},
                {"id": 2, "start": 5, "end": 6, "dep": "ROOT", "head": 2}
            ]
        }"#;
        let result = SpacyDoc::from_json(json).unwrap().into_document();
        assert!(matches!(result, Err(NlpError::InvalidDocument(_))));
    }

    #[test]
    fn test_misaligned_entity_rejected() {
        let json = r#"{
            "text": "Kraków nocą",
            "ents": [{"start": 0, "end": 3, "label": "placeName"}],
            "tokens": [
                {"id": 0, "start": 0, "end": 6, "dep": "ROOT", "head": 0},
                {"id": 1, "start": 7, "end": 11, "dep": "obl", "head": 0}
            ]
        }"#;
        let result = SpacyDoc::from_json(json).unwrap().into_document();
        assert!(matches!(result, Err(NlpError::InvalidDocument(_))));
    }

    #[test]
    fn test_offsets_past_text_rejected() {
        let json = r#"{
            "text": "Ab",
            "tokens": [{"id": 0, "start": 0, "end": 5, "dep": "ROOT", "head": 0}]
        }"#;
        let result = SpacyDoc::from_json(json).unwrap().into_document();
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_document() {
        let doc = SpacyDoc::from_json(r#"{"text": ""}"#)
            .unwrap()
            .into_document()
            .unwrap();
        assert_eq!(doc.sentences.len(), 1);
        assert!(doc.sentences[0].tree.is_empty());
    }
}
