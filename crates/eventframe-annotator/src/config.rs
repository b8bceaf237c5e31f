//! Configuration for the annotation pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for batch annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Records sent to the oracle per call
    pub batch_size: usize,

    /// Maximum time for a single oracle call (seconds)
    pub batch_timeout_secs: u64,

    /// Pause between consecutive batches (milliseconds)
    pub inter_batch_delay_ms: u64,

    /// File the accumulated labeled corpus is written to after each batch
    pub checkpoint_path: PathBuf,

    /// Continue from an existing checkpoint instead of starting over
    pub resume: bool,
}

impl PipelineConfig {
    /// Get the batch timeout as a Duration
    pub fn batch_timeout(&self) -> Duration {
        Duration::from_secs(self.batch_timeout_secs)
    }

    /// Get the inter-batch delay as a Duration
    pub fn inter_batch_delay(&self) -> Duration {
        Duration::from_millis(self.inter_batch_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        if self.batch_timeout_secs == 0 {
            return Err("batch_timeout_secs must be greater than 0".to_string());
        }
        if self.checkpoint_path.as_os_str().is_empty() {
            return Err("checkpoint_path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            batch_timeout_secs: 120,
            inter_batch_delay_ms: 1000,
            checkpoint_path: PathBuf::from("classified_data.json"),
            resume: false,
        }
    }
}

impl PipelineConfig {
    /// Lenient preset: smaller batches, longer timeout, slower pacing
    pub fn lenient() -> Self {
        Self {
            batch_size: 20,
            batch_timeout_secs: 300,
            inter_batch_delay_ms: 4000,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.inter_batch_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_lenient_config_is_valid() {
        assert!(PipelineConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = PipelineConfig {
            batch_size: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig {
            checkpoint_path: PathBuf::from("out/labeled.json"),
            resume: true,
            ..PipelineConfig::default()
        };
        let parsed = PipelineConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PipelineConfig::from_toml("batch_size = 10").unwrap();
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.batch_timeout_secs, 120);
    }
}
