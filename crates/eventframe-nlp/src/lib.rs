//! EventFrame NLP Adapters
//!
//! Bridges the external linguistic toolchain into the domain model. Parsing
//! and classification happen elsewhere; this crate only talks to those
//! services and converts their output.
//!
//! - [`SpacyDoc`]: spaCy `Doc.to_json()` model, converted into per-sentence
//!   [`DependencyTree`](eventframe_domain::DependencyTree)s
//! - [`HttpAnnotator`]: `LinguisticAnnotator` over a parse service
//! - [`HttpClassifier`]: `SentenceClassifier` over a textcat service

#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod spacy;

pub use error::NlpError;
pub use http::{HttpAnnotator, HttpClassifier};
pub use spacy::SpacyDoc;
