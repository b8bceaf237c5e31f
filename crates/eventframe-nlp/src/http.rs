//! HTTP clients for the external annotator and classifier services
//!
//! Both services take `{"text": ...}`. The annotator answers with a spaCy
//! document, the classifier with `{"cats": {label: score}}`.

use crate::error::NlpError;
use crate::spacy::SpacyDoc;
use eventframe_domain::traits::{LinguisticAnnotator, SentenceClassifier};
use eventframe_domain::{AnnotatedDocument, LabelScores};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Default annotator/classifier service endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    cats: BTreeMap<String, f64>,
}

fn build_client(timeout: Duration) -> Result<Client, NlpError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

fn post_text<T: DeserializeOwned>(client: &Client, url: &str, text: &str) -> Result<T, NlpError> {
    let response = client.post(url).json(&TextRequest { text }).send()?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(NlpError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<T>()?)
}

/// Linguistic annotator backed by a spaCy parse service
pub struct HttpAnnotator {
    url: String,
    client: Client,
}

impl HttpAnnotator {
    /// Create an annotator posting to `{endpoint}/parse`
    pub fn new(endpoint: &str) -> Result<Self, NlpError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create an annotator with a custom request timeout
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, NlpError> {
        Ok(Self {
            url: format!("{}/parse", endpoint.trim_end_matches('/')),
            client: build_client(timeout)?,
        })
    }
}

impl LinguisticAnnotator for HttpAnnotator {
    type Error = NlpError;

    fn annotate(&self, text: &str) -> Result<AnnotatedDocument, Self::Error> {
        let doc: SpacyDoc = post_text(&self.client, &self.url, text)?;
        debug!("Parsed {} tokens", doc.tokens.len());
        doc.into_document()
    }
}

/// Sentence classifier backed by a text-categorisation service
pub struct HttpClassifier {
    url: String,
    client: Client,
}

impl HttpClassifier {
    /// Create a classifier posting to `{endpoint}/classify`
    pub fn new(endpoint: &str) -> Result<Self, NlpError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a classifier with a custom request timeout
    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, NlpError> {
        Ok(Self {
            url: format!("{}/classify", endpoint.trim_end_matches('/')),
            client: build_client(timeout)?,
        })
    }
}

/// Convert a `cats` mapping into label scores
pub fn scores_from_cats(cats: BTreeMap<String, f64>) -> Result<LabelScores, NlpError> {
    Ok(LabelScores::from_pairs(cats)?)
}

impl SentenceClassifier for HttpClassifier {
    type Error = NlpError;

    fn classify(&self, text: &str) -> Result<LabelScores, Self::Error> {
        let response: ClassifyResponse = post_text(&self.client, &self.url, text)?;
        scores_from_cats(response.cats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventframe_domain::Label;

    #[test]
    fn test_urls() {
        let annotator = HttpAnnotator::new("http://localhost:8000/").unwrap();
        assert_eq!(annotator.url, "http://localhost:8000/parse");
        let classifier = HttpClassifier::new(DEFAULT_ENDPOINT).unwrap();
        assert_eq!(classifier.url, "http://localhost:8000/classify");
    }

    #[test]
    fn test_scores_from_polish_cats() {
        let response: ClassifyResponse = serde_json::from_str(
            r#"{"cats": {"BRAK_ZDARZENIA": 0.1, "PRZESTEPSTWO": 0.85, "WYPADEK": 0.05}}"#,
        )
        .unwrap();
        let scores = scores_from_cats(response.cats).unwrap();
        assert_eq!(scores.best(), (Label::Crime, 0.85));
        assert_eq!(scores.get(Label::Politics), 0.0);
    }

    #[test]
    fn test_unknown_cat_rejected() {
        let mut cats = BTreeMap::new();
        cats.insert("SPORT".to_string(), 0.9);
        assert!(matches!(scores_from_cats(cats), Err(NlpError::Domain(_))));
    }

    #[test]
    fn test_unreachable_service() {
        let classifier =
            HttpClassifier::with_timeout("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        assert!(matches!(
            classifier.classify("Zdanie."),
            Err(NlpError::Transport(_))
        ));
    }
}
