//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// EventFrame CLI - Detect events in news text and build training corpora.
#[derive(Debug, Parser)]
#[command(name = "eventframe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (labels only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify sentences of a document and extract event frames
    Analyze(AnalyzeArgs),

    /// Label a corpus with an LLM oracle
    Annotate(AnnotateArgs),

    /// Downsample NO_EVENT records to a target corpus size
    Balance(BalanceArgs),

    /// Split a labeled corpus into train/dev/test sets
    Split(SplitArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Text to analyze
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the document from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Only show sentences predicted as events
    #[arg(short, long)]
    pub events_only: bool,

    /// Annotator service URL (overrides config)
    #[arg(long)]
    pub annotator_url: Option<String>,

    /// Classifier service URL (overrides config)
    #[arg(long)]
    pub classifier_url: Option<String>,
}

/// Arguments for the annotate command.
#[derive(Debug, Parser)]
pub struct AnnotateArgs {
    /// Unlabeled corpus (JSON array of records)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Labeled output, rewritten after every batch (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Oracle provider (overrides config)
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Oracle model name (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Sentences per oracle call (overrides config)
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Continue from an existing output file
    #[arg(long)]
    pub resume: bool,

    /// Smaller batches, longer timeout and slower pacing
    #[arg(long)]
    pub lenient: bool,
}

/// Oracle provider options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProviderArg {
    /// Google Gemini
    Gemini,
    /// Local Ollama server
    Ollama,
}

/// Arguments for the balance command.
#[derive(Debug, Parser)]
pub struct BalanceArgs {
    /// Labeled corpus
    #[arg(short, long)]
    pub input: PathBuf,

    /// Balanced output file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target corpus size (overrides config)
    #[arg(short, long, conflicts_with = "full")]
    pub target: Option<usize>,

    /// Use the full training-set target size
    #[arg(long)]
    pub full: bool,

    /// Shuffle seed (overrides config)
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the split command.
#[derive(Debug, Parser)]
pub struct SplitArgs {
    /// Labeled corpus
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory receiving train.json, dev.json and test.json
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Dev fraction per class (overrides config)
    #[arg(long)]
    pub dev: Option<f64>,

    /// Test fraction per class (overrides config)
    #[arg(long)]
    pub test: Option<f64>,

    /// Shuffle seed (overrides config)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Do not oversample smaller train classes
    #[arg(long)]
    pub no_oversample: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ProviderArg> for crate::config::OracleKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Gemini => crate::config::OracleKind::Gemini,
            ProviderArg::Ollama => crate::config::OracleKind::Ollama,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from(["eventframe", "analyze", "Złodziej ukradł rower.", "-e"]).unwrap();
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.text.as_deref(), Some("Złodziej ukradł rower."));
                assert!(args.events_only);
                assert!(args.file.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_analyze_text_and_file_conflict() {
        let result = Cli::try_parse_from(["eventframe", "analyze", "tekst", "--file", "a.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_annotate_with_globals() {
        let cli = Cli::try_parse_from([
            "eventframe",
            "annotate",
            "--input",
            "input_data.json",
            "--provider",
            "ollama",
            "--batch-size",
            "10",
            "--format",
            "json",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Annotate(args) => {
                assert_eq!(args.input, PathBuf::from("input_data.json"));
                assert!(matches!(args.provider, Some(ProviderArg::Ollama)));
                assert_eq!(args.batch_size, Some(10));
                assert!(!args.resume);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_balance_full_conflicts_with_target() {
        let cli = Cli::try_parse_from(["eventframe", "balance", "-i", "a.json", "-o", "b.json", "--full"])
            .unwrap();
        assert!(matches!(cli.command, Command::Balance(BalanceArgs { full: true, .. })));

        let result = Cli::try_parse_from([
            "eventframe", "balance", "-i", "a.json", "-o", "b.json", "--full", "--target", "10",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::try_parse_from(["eventframe", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force: true }
            })
        ));
    }
}
