//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub async fn execute_config(
    args: ConfigArgs,
    config: &AppConfig,
    config_path: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            let path = AppConfig::resolve_path(config_path)?;
            if path.exists() && !force {
                return Err(CliError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            AppConfig::default().save(&path)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
        ConfigAction::Path => {
            println!("{}", AppConfig::resolve_path(config_path)?.display());
        }
    }

    Ok(())
}
