//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use eventframe_corpus::LabelCounts;
use eventframe_domain::{AnnotatedSentence, Label, Slot};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Sentences longer than this are cut in table output.
const MAX_SENTENCE_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format analyzed sentences.
    ///
    /// Predictions below `high_confidence` are marked as uncertain.
    pub fn format_sentences(
        &self,
        sentences: &[AnnotatedSentence],
        high_confidence: f64,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(sentences)?),
            OutputFormat::Table => Ok(self.format_sentences_table(sentences, high_confidence)),
            OutputFormat::Quiet => Ok(sentences
                .iter()
                .map(|s| s.classification.label.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_sentences_table(&self, sentences: &[AnnotatedSentence], high_confidence: f64) -> String {
        if sentences.is_empty() {
            return self.colorize("No sentences found.", "yellow");
        }

        let mut builder = Builder::default();
        let mut header = vec!["Sentence".to_string(), "Label".to_string(), "Confidence".to_string()];
        header.extend(Slot::ALL.iter().map(|slot| slot.key().to_string()));
        builder.push_record(header);

        for sentence in sentences {
            let label = sentence.classification.label;
            let confidence = sentence.classification.confidence();

            let confidence_cell = if confidence >= high_confidence {
                format!("{:.2}", confidence)
            } else {
                self.colorize(&format!("{:.2} ?", confidence), "yellow")
            };

            let mut row = vec![
                truncate(&sentence.text, MAX_SENTENCE_WIDTH),
                self.label_cell(label),
                confidence_cell,
            ];
            row.extend(sentence.frame.iter().map(|(_, value)| value.to_string()));
            builder.push_record(row);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a label distribution.
    pub fn format_counts(&self, counts: &LabelCounts) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let labels: serde_json::Map<String, serde_json::Value> = counts
                    .most_common()
                    .into_iter()
                    .map(|(label, count)| (label.as_str().to_string(), count.into()))
                    .collect();
                let json = serde_json::json!({
                    "total": counts.total(),
                    "events": counts.events(),
                    "unlabeled": counts.unlabeled(),
                    "labels": labels,
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => Ok(self.format_counts_table(counts)),
            OutputFormat::Quiet => Ok(counts.total().to_string()),
        }
    }

    fn format_counts_table(&self, counts: &LabelCounts) -> String {
        if counts.total() + counts.unlabeled() == 0 {
            return self.colorize("No records found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Label", "Count", "Share"]);

        let total = (counts.total() + counts.unlabeled()) as f64;
        for (label, count) in counts.most_common() {
            builder.push_record([
                self.label_cell(label),
                count.to_string(),
                format!("{:.1}%", 100.0 * count as f64 / total),
            ]);
        }
        if counts.unlabeled() > 0 {
            builder.push_record([
                self.colorize("(unlabeled)", "yellow"),
                counts.unlabeled().to_string(),
                format!("{:.1}%", 100.0 * counts.unlabeled() as f64 / total),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the per-label distribution of a train/dev/test split.
    pub fn format_split(&self, counts: &[LabelCounts; 3]) -> Result<String> {
        let [train, dev, test] = counts;
        match self.format {
            OutputFormat::Json => {
                let per_split = |c: &LabelCounts| {
                    c.most_common()
                        .into_iter()
                        .map(|(label, count)| (label.as_str().to_string(), serde_json::Value::from(count)))
                        .collect::<serde_json::Map<_, _>>()
                };
                let json = serde_json::json!({
                    "train": per_split(train),
                    "dev": per_split(dev),
                    "test": per_split(test),
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Label", "Train", "Dev", "Test"]);

                for label in Label::ALL {
                    if train.get(label) + dev.get(label) + test.get(label) == 0 {
                        continue;
                    }
                    builder.push_record([
                        self.label_cell(label),
                        train.get(label).to_string(),
                        dev.get(label).to_string(),
                        test.get(label).to_string(),
                    ]);
                }
                builder.push_record([
                    "Total".to_string(),
                    train.total().to_string(),
                    dev.total().to_string(),
                    test.total().to_string(),
                ]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(format!("{} {} {}", train.total(), dev.total(), test.total())),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a written-file message.
    pub fn file_written(&self, path: &std::path::Path, records: usize) -> String {
        self.success(&format!("Wrote {} record(s) to {}", records, path.display()))
    }

    fn label_cell(&self, label: Label) -> String {
        let color = match label {
            Label::NoEvent => "",
            Label::ErrorApi => "magenta",
            l if l.is_alert() => "red",
            _ => "cyan",
        };
        self.colorize(label.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
