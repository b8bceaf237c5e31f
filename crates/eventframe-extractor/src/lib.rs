//! EventFrame Extractor
//!
//! Turns documents into annotated sentences: each sentence gets a classifier
//! verdict and a five-slot event frame.
//!
//! # Architecture
//!
//! ```text
//! Document → LinguisticAnnotator → sentences ─┬→ SentenceClassifier → ClassificationResult
//!                                             └→ SlotExtractor      → EventFrame
//! ```
//!
//! The slot engine is a deterministic rule system over the external parse:
//! the predicate lemma is the trigger, first-level dependents fill agent,
//! patient, location and time, and the entity layer backs up location and
//! time when the dependency rules found nothing.
//!
//! # Example Usage
//!
//! ```
//! use eventframe_domain::{DependencyTree, Relation, Slot, Token};
//! use eventframe_extractor::SlotExtractor;
//!
//! let tree = DependencyTree::new(
//!     vec![
//!         Token::new("Policja", "policja", Relation::parse("nsubj"), Some(1)),
//!         Token::new("ujęła", "ująć", Relation::Root, None),
//!         Token::new("sprawcę", "sprawca", Relation::parse("obj"), Some(1)),
//!     ],
//!     vec![],
//! )
//! .unwrap();
//!
//! let frame = SlotExtractor::default().extract(&tree);
//! assert_eq!(frame.get(Slot::Trigger).as_deref(), Some("ująć"));
//! assert_eq!(frame.get(Slot::Agent).as_deref(), Some("Policja"));
//! assert_eq!(frame.get(Slot::Patient).as_deref(), Some("sprawcę"));
//! ```

#![warn(missing_docs)]

mod config;
mod dispatch;
mod engine;
mod error;


pub use config::ExtractorConfig;
pub use dispatch::{DispatchFilter, Dispatcher};
pub use engine::SlotExtractor;
pub use error::ExtractorError;
