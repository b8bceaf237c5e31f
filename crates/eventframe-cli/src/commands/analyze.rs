//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use eventframe_extractor::{DispatchFilter, Dispatcher};
use eventframe_nlp::{HttpAnnotator, HttpClassifier};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::time::Duration;

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    config: &AppConfig,
    formatter: &Formatter,
) -> Result<()> {
    let document = read_document(&args)?;
    if document.trim().is_empty() {
        return Err(CliError::InvalidInput("No text to analyze".to_string()));
    }

    let annotator_url = args
        .annotator_url
        .unwrap_or_else(|| config.nlp.annotator_url.clone());
    let classifier_url = args
        .classifier_url
        .unwrap_or_else(|| config.nlp.classifier_url.clone());
    let timeout = Duration::from_secs(config.nlp.timeout_secs);
    let extractor_config = config.extractor.clone();
    let high_confidence = extractor_config.high_confidence;
    let filter = if args.events_only {
        DispatchFilter::EventsOnly
    } else {
        DispatchFilter::All
    };

    // The NLP clients are blocking
    let sentences = tokio::task::spawn_blocking(move || -> Result<_> {
        let annotator = HttpAnnotator::with_timeout(&annotator_url, timeout)?;
        let classifier = HttpClassifier::with_timeout(&classifier_url, timeout)?;
        let dispatcher =
            Dispatcher::new(annotator, classifier, extractor_config).with_filter(filter);
        Ok(dispatcher.dispatch(&document)?)
    })
    .await
    .map_err(|e| CliError::Task(e.to_string()))??;

    println!("{}", formatter.format_sentences(&sentences, high_confidence)?);

    Ok(())
}

/// Take the document from the argument, a file, or piped stdin.
fn read_document(args: &AnalyzeArgs) -> Result<String> {
    if let Some(text) = &args.text {
        Ok(text.clone())
    } else if let Some(path) = &args.file {
        Ok(fs::read_to_string(path)?)
    } else if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Err(CliError::InvalidInput(
            "Must specify text, --file, or pipe a document on stdin".to_string(),
        ))
    }
}
