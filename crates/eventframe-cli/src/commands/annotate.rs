//! Annotate command implementation.

use crate::cli::AnnotateArgs;
use crate::config::{AppConfig, OracleKind};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use eventframe_annotator::{AnnotationPipeline, AnnotationReport, PipelineConfig};
use eventframe_domain::traits::LlmProvider;
use eventframe_llm::{gemini, GeminiProvider, OllamaProvider};
use std::path::Path;

/// Execute the annotate command.
pub async fn execute_annotate(
    args: AnnotateArgs,
    config: &AppConfig,
    formatter: &Formatter,
) -> Result<()> {
    let mut pipeline_config = if args.lenient {
        PipelineConfig {
            checkpoint_path: config.pipeline.checkpoint_path.clone(),
            resume: config.pipeline.resume,
            ..PipelineConfig::lenient()
        }
    } else {
        config.pipeline.clone()
    };
    if let Some(output) = args.output {
        pipeline_config.checkpoint_path = output;
    }
    if let Some(batch_size) = args.batch_size {
        pipeline_config.batch_size = batch_size;
    }
    if args.resume {
        pipeline_config.resume = true;
    }
    pipeline_config.validate().map_err(CliError::Config)?;
    let budget = pipeline_config.batch_timeout();

    let provider = args
        .provider
        .map(Into::into)
        .unwrap_or(config.oracle.provider);
    let model = args.model.or_else(|| config.oracle.model.clone());

    let report = match provider {
        OracleKind::Gemini => {
            let api_key = args
                .api_key
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    CliError::Config(
                        "Gemini API key missing: set GEMINI_API_KEY or pass --api-key".to_string(),
                    )
                })?;
            let model = model.unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string());
            let oracle = GeminiProvider::new(api_key, model)?
                .with_max_retries(config.oracle.max_retries)
                .with_time_budget(budget)?;
            run_pipeline(oracle, pipeline_config, &args.input).await?
        }
        OracleKind::Ollama => {
            let model = model.ok_or_else(|| {
                CliError::Config("Ollama needs a model: pass --model or set [oracle] model".to_string())
            })?;
            let oracle = OllamaProvider::new(config.oracle.ollama_endpoint.as_str(), model)?
                .with_max_retries(config.oracle.max_retries)
                .with_time_budget(budget)?;
            run_pipeline(oracle, pipeline_config, &args.input).await?
        }
    };

    println!("{}", formatter.format_counts(&report.counts)?);

    if report.resumed > 0 {
        eprintln!(
            "{}",
            formatter.info(&format!("Resumed after {} labeled record(s)", report.resumed))
        );
    }
    if report.failed_batches > 0 {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{} of {} batch(es) failed; {} record(s) labeled ERROR_API",
                report.failed_batches,
                report.oracle_calls,
                report.error_records()
            ))
        );
    }

    if report.checkpoint_stale {
        eprintln!(
            "{}",
            formatter.warning("Last checkpoint write failed; the output file is behind this run")
        );
    }

    Ok(())
}

async fn run_pipeline<L>(oracle: L, config: PipelineConfig, input: &Path) -> Result<AnnotationReport>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    let checkpoint = config.checkpoint_path.clone();
    let pipeline = AnnotationPipeline::new(oracle, config);
    let report = pipeline.run(input).await?;

    tracing::info!(
        "Wrote {} labeled records to {}",
        report.records.len(),
        checkpoint.display()
    );
    Ok(report)
}
