//! Batch annotation pipeline

use crate::config::PipelineConfig;
use crate::error::AnnotatorError;
use crate::parser::parse_oracle_response;
use crate::prompt::{PromptBuilder, RESPONSE_SCHEMA};
use crate::types::{AnnotationReport, BatchOutcome};
use eventframe_corpus::{load_corpus, save_corpus, CorpusRecord, LabelCounts};
use eventframe_domain::traits::LlmProvider;
use eventframe_domain::Label;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Labels a corpus through an LLM oracle, one checkpointed batch at a time
pub struct AnnotationPipeline<L>
where
    L: LlmProvider,
{
    oracle: Arc<L>,
    config: PipelineConfig,
}

/// Positionally merge an oracle outcome into a batch of records
///
/// Position i takes the i-th returned label; missing positions, unknown
/// labels and failed calls all become `ERROR_API`. Extra returned entries
/// are ignored.
pub fn merge_batch(batch: &[CorpusRecord], outcome: &BatchOutcome) -> Vec<CorpusRecord> {
    let labels = match outcome {
        BatchOutcome::Labeled(labels) => labels.as_slice(),
        BatchOutcome::Failed(_) => &[],
    };

    if labels.len() > batch.len() {
        debug!(
            "Oracle returned {} labels for {} records; ignoring the rest",
            labels.len(),
            batch.len()
        );
    }

    batch
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let label = match labels.get(idx) {
                Some(entry) => entry.resolve().unwrap_or_else(|| {
                    warn!("Dropping unknown label {:?} at position {}", entry.label, idx);
                    Label::ErrorApi
                }),
                None => Label::ErrorApi,
            };
            record.with_label(label)
        })
        .collect()
}

impl<L> AnnotationPipeline<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new pipeline
    pub fn new(oracle: L, config: PipelineConfig) -> Self {
        Self {
            oracle: Arc::new(oracle),
            config,
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Label every record of the corpus at `input`
    ///
    /// The accumulated result is written to the checkpoint path after every
    /// batch, and each oracle call finishes before the next batch starts.
    /// Only precondition failures (bad config, unreadable input, a
    /// checkpoint that does not match the input) abort the run; oracle
    /// failures degrade the affected records to `ERROR_API`. A failed
    /// checkpoint write is logged and retried after the next batch, and the
    /// report flags a checkpoint left behind the returned records.
    pub async fn run(&self, input: &Path) -> Result<AnnotationReport, AnnotatorError> {
        self.config.validate().map_err(AnnotatorError::Config)?;

        let records = load_corpus(input)?;
        let mut labeled = self.resume_point(&records)?;
        let resumed = labeled.len();

        let remaining = &records[resumed..];
        let batch_size = self.config.batch_size;
        let total_batches = remaining.len().div_ceil(batch_size);

        info!(
            "Annotating {} records from {} in {} batches ({} resumed)",
            remaining.len(),
            input.display(),
            total_batches,
            resumed
        );

        let mut counts = LabelCounts::from_records(&labeled);
        let mut oracle_calls = 0;
        let mut failed_batches = 0;
        let mut checkpoint_stale = false;

        for (idx, batch) in remaining.chunks(batch_size).enumerate() {
            info!(
                "Batch {}/{}: records {}..{}",
                idx + 1,
                total_batches,
                resumed + idx * batch_size,
                resumed + idx * batch_size + batch.len()
            );

            let outcome = self.annotate_batch(batch).await;
            oracle_calls += 1;
            if let BatchOutcome::Failed(e) = &outcome {
                failed_batches += 1;
                warn!("Batch {} failed, labeling it ERROR_API: {}", idx + 1, e);
            }

            for record in merge_batch(batch, &outcome) {
                if let Some(label) = record.label {
                    counts.record(label);
                }
                labeled.push(record);
            }

            checkpoint_stale = !self.checkpoint(&labeled);
            info!("Progress: {} records {}", labeled.len(), counts);

            if idx + 1 < total_batches && !self.config.inter_batch_delay().is_zero() {
                tokio::time::sleep(self.config.inter_batch_delay()).await;
            }
        }

        if total_batches == 0 {
            checkpoint_stale = !self.checkpoint(&labeled);
        }

        info!(
            "Annotation complete: {} records, {} oracle calls, {} failed batches",
            labeled.len(),
            oracle_calls,
            failed_batches
        );

        Ok(AnnotationReport {
            records: labeled,
            counts,
            oracle_calls,
            failed_batches,
            resumed,
            checkpoint_stale,
        })
    }

    /// Send one batch to the oracle
    pub async fn annotate_batch(&self, batch: &[CorpusRecord]) -> BatchOutcome {
        let texts: Vec<&str> = batch.iter().map(|r| r.text.as_str()).collect();
        let prompt = match PromptBuilder::new(&texts).build() {
            Ok(prompt) => prompt,
            Err(e) => return BatchOutcome::Failed(e),
        };

        debug!("Prompt length: {} chars", prompt.len());

        let mut call = self.spawn_oracle(prompt);
        let joined = match timeout(self.config.batch_timeout(), &mut call).await {
            Ok(joined) => joined,
            Err(_) => {
                // blocking calls cannot be cancelled; oracle calls must not overlap
                warn!(
                    "Oracle call exceeded {:?}, waiting for it to return",
                    self.config.batch_timeout()
                );
                if let Err(e) = call.await {
                    debug!("Timed-out oracle task ended abnormally: {}", e);
                }
                return BatchOutcome::Failed(AnnotatorError::Timeout);
            }
        };

        let response = match joined {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return BatchOutcome::Failed(e),
            Err(e) => {
                return BatchOutcome::Failed(AnnotatorError::Llm(format!("Task join error: {}", e)))
            }
        };

        debug!("Oracle response length: {} chars", response.len());

        match parse_oracle_response(&response) {
            Ok(labels) => {
                if labels.len() != batch.len() {
                    warn!(
                        "Oracle returned {} labels for a batch of {}",
                        labels.len(),
                        batch.len()
                    );
                }
                BatchOutcome::Labeled(labels)
            }
            Err(e) => BatchOutcome::Failed(e),
        }
    }

    /// Records already labeled by a previous run, if resuming
    fn resume_point(&self, input: &[CorpusRecord]) -> Result<Vec<CorpusRecord>, AnnotatorError> {
        let path = &self.config.checkpoint_path;
        if !self.config.resume || !path.exists() {
            return Ok(Vec::new());
        }

        let checkpoint = load_corpus(path)?;
        if checkpoint.len() > input.len() {
            return Err(AnnotatorError::ResumeMismatch { index: input.len() });
        }
        if let Some(index) = checkpoint
            .iter()
            .zip(input)
            .position(|(done, original)| done.text != original.text)
        {
            return Err(AnnotatorError::ResumeMismatch { index });
        }
        if let Some(index) = checkpoint.iter().position(|r| r.label.is_none()) {
            return Err(AnnotatorError::ResumeMismatch { index });
        }

        info!(
            "Resuming from {} with {} labeled records",
            path.display(),
            checkpoint.len()
        );
        Ok(checkpoint)
    }

    /// Write the labeled prefix to the checkpoint path, `false` on failure
    fn checkpoint(&self, labeled: &[CorpusRecord]) -> bool {
        match save_corpus(&self.config.checkpoint_path, labeled) {
            Ok(()) => true,
            Err(e) => {
                warn!("Checkpoint not written, continuing: {}", e);
                false
            }
        }
    }

    /// Start the oracle call on a blocking thread
    fn spawn_oracle(&self, prompt: String) -> JoinHandle<Result<String, AnnotatorError>> {
        let oracle = Arc::clone(&self.oracle);

        tokio::task::spawn_blocking(move || {
            oracle
                .generate_structured(&prompt, RESPONSE_SCHEMA)
                .map_err(|e| AnnotatorError::Llm(e.to_string()))
        })
    }
}
