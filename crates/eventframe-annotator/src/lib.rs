//! EventFrame Annotator
//!
//! Labels an unlabeled sentence corpus with an LLM oracle to bootstrap
//! classifier training data.
//!
//! # Architecture
//!
//! ```text
//! corpus.json → batches → PromptBuilder → LlmProvider → parser → merge → checkpoint
//! ```
//!
//! Batches run strictly one after another. Each oracle call happens on a
//! blocking task under a timeout, and whatever it yields is merged
//! positionally: records the oracle did not label come out as `ERROR_API`
//! instead of stopping the run. The full accumulated corpus is written to the
//! checkpoint file after every batch.
//!
//! # Example Usage
//!
//! ```no_run
//! use eventframe_annotator::{AnnotationPipeline, PipelineConfig};
//! use eventframe_llm::MockProvider;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let oracle = MockProvider::new(r#"{"results": []}"#);
//! let pipeline = AnnotationPipeline::new(oracle, PipelineConfig::default());
//!
//! let report = pipeline.run(Path::new("input_data.json")).await?;
//! println!("{}", report.counts.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod parser;
mod pipeline;
mod prompt;
mod types;


pub use config::PipelineConfig;
pub use error::AnnotatorError;
pub use parser::parse_oracle_response;
pub use pipeline::{merge_batch, AnnotationPipeline};
pub use prompt::{PromptBuilder, RESPONSE_SCHEMA};
pub use types::{AnnotationReport, BatchOutcome, OracleLabel};
