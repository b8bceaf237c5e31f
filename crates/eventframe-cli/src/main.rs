//! EventFrame CLI - Command-line interface for event detection and corpus preparation.

use clap::Parser;
use eventframe_cli::commands;
use eventframe_cli::{AppConfig, Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> eventframe_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config, falling back to defaults when there is no file
    let config_path = cli.config.as_deref();
    let config = AppConfig::load(config_path)?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.output.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.output.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Analyze(args) => commands::execute_analyze(args, &config, &formatter).await?,
        Command::Annotate(args) => commands::execute_annotate(args, &config, &formatter).await?,
        Command::Balance(args) => commands::execute_balance(args, &config, &formatter).await?,
        Command::Split(args) => commands::execute_split(args, &config, &formatter).await?,
        Command::Config(args) => {
            commands::execute_config(args, &config, config_path, &formatter).await?
        }
    }

    Ok(())
}

/// Log to stderr; `--verbose` forces debug, otherwise `RUST_LOG` or info.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
