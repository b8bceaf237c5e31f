//! Configuration for the Extractor
//!
//! The slot engine's lexicon (entity tag sets and lexical markers) depends on
//! the annotator's tag vocabulary and the corpus language, so it lives here
//! rather than in code.

use serde::{Deserialize, Serialize};

/// Configuration for slot extraction and sentence dispatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Entity types treated as places
    pub place_tags: Vec<String>,

    /// Entity types treated as dates or times
    pub time_tags: Vec<String>,

    /// Words whose presence (as a substring) marks an oblique as temporal
    pub temporal_markers: Vec<String>,

    /// Space-delimited prepositions marking an oblique as locative
    pub locative_markers: Vec<String>,

    /// Sentences shorter than this (trimmed, in characters) are skipped
    pub min_sentence_chars: usize,

    /// Maximum document length accepted by the dispatcher (characters)
    pub max_text_length: usize,

    /// Classifier confidence at or above which a prediction is reported as firm
    pub high_confidence: f64,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ExtractorConfig {
    /// Lexicon for Polish news parsed with NKJP/UD tags
    pub fn polish() -> Self {
        Self {
            place_tags: strings(&["placeName", "geogName", "GPE", "LOC"]),
            time_tags: strings(&["date", "time"]),
            temporal_markers: strings(&["wczoraj", "dziś", "roku"]),
            locative_markers: strings(&[" w ", " na "]),
            min_sentence_chars: 3,
            max_text_length: 50_000,
            high_confidence: 0.8,
        }
    }

    /// Lexicon for English text parsed with OntoNotes tags
    pub fn english() -> Self {
        Self {
            place_tags: strings(&["GPE", "LOC", "FAC"]),
            time_tags: strings(&["DATE", "TIME"]),
            temporal_markers: strings(&["yesterday", "today", "year"]),
            locative_markers: strings(&[" in ", " at ", " on "]),
            ..Self::polish()
        }
    }

    /// Whether an entity type denotes a place
    pub fn is_place(&self, tag: &str) -> bool {
        self.place_tags.iter().any(|t| t == tag)
    }

    /// Whether an entity type denotes a date or time
    pub fn is_time(&self, tag: &str) -> bool {
        self.time_tags.iter().any(|t| t == tag)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.high_confidence) {
            return Err(format!(
                "high_confidence {} out of range [0.0, 1.0]",
                self.high_confidence
            ));
        }
        if self.temporal_markers.iter().any(|m| m.is_empty()) {
            return Err("temporal_markers cannot contain empty strings".to_string());
        }
        if self.locative_markers.iter().any(|m| m.trim().is_empty()) {
            return Err("locative_markers cannot contain blank strings".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::polish()
    }
}
