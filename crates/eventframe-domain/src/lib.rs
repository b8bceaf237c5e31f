//! EventFrame Domain Layer
//!
//! Value objects and collaborator interfaces shared by every other crate.
//! The only external dependency is `serde`, used for the wire format of the
//! values that get persisted.
//!
//! ## Key Concepts
//!
//! - **DependencyTree**: read-only view over an externally produced parse
//! - **EventFrame**: fixed five-slot extraction result (trigger, agent,
//!   patient, location, time); slots are never absent
//! - **Label**: closed sentence-classification vocabulary plus the
//!   `ERROR_API` sentinel
//! - **Traits**: annotator, classifier and LLM oracle boundaries

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classification;
pub mod error;
pub mod frame;
pub mod label;
pub mod token;
pub mod traits;
pub mod tree;

// Re-exports for convenience
pub use classification::{AnnotatedSentence, ClassificationResult, LabelScores};
pub use error::DomainError;
pub use frame::{EventFrame, EventFrameBuilder, Slot, SlotValue, UNSET_MARKER};
pub use label::Label;
pub use token::{EntitySpan, Relation, Token};
pub use traits::{AnnotatedDocument, SentenceParse};
pub use tree::DependencyTree;
