//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use eventframe_annotator::PipelineConfig;
use eventframe_corpus::{BalancerConfig, SplitConfig};
use eventframe_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// Every section is optional in the file; missing sections and keys take
/// their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Slot extraction and dispatch
    pub extractor: ExtractorConfig,

    /// Batch annotation
    pub pipeline: PipelineConfig,

    /// Corpus balancing
    pub balancer: BalancerConfig,

    /// Train/dev/test split
    pub split: SplitConfig,

    /// Annotation oracle
    pub oracle: OracleConfig,

    /// External NLP services
    pub nlp: NlpConfig,

    /// Output settings
    pub output: Settings,
}

/// Annotation oracle settings.
///
/// The Gemini API key is never stored here; it comes from `GEMINI_API_KEY`
/// or `--api-key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Provider used by `annotate`
    pub provider: OracleKind,

    /// Model name; the provider default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Ollama server URL
    pub ollama_endpoint: String,

    /// Transport retries per oracle call
    pub max_retries: u32,
}

/// Oracle provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    /// Google Gemini
    Gemini,
    /// Local Ollama server
    Ollama,
}

/// External NLP service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NlpConfig {
    /// Annotator service URL
    pub annotator_url: String,

    /// Classifier service URL
    pub classifier_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl AppConfig {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".eventframe").join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default one.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from file, or defaults if there is none.
    ///
    /// An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let resolved = Self::resolve_path(path)?;

        if resolved.exists() {
            let contents = fs::read_to_string(&resolved)?;
            let config: AppConfig = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else if path.is_some() {
            Err(CliError::Config(format!(
                "Config file {} does not exist",
                resolved.display()
            )))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        let sections = [
            ("extractor", self.extractor.validate()),
            ("pipeline", self.pipeline.validate()),
            ("balancer", self.balancer.validate()),
            ("split", self.split.validate()),
        ];

        for (name, result) in sections {
            result.map_err(|e| CliError::Config(format!("[{}] {}", name, e)))?;
        }
        Ok(())
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            provider: OracleKind::Gemini,
            model: None,
            ollama_endpoint: eventframe_llm::ollama::DEFAULT_ENDPOINT.to_string(),
            max_retries: eventframe_llm::ollama::DEFAULT_MAX_RETRIES,
        }
    }
}

impl Default for NlpConfig {
    fn default() -> Self {
        Self {
            annotator_url: eventframe_nlp::http::DEFAULT_ENDPOINT.to_string(),
            classifier_url: eventframe_nlp::http::DEFAULT_ENDPOINT.to_string(),
            timeout_secs: eventframe_nlp::http::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
