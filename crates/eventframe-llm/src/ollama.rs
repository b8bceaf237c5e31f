//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API, for labeling corpora
//! without sending them to a hosted service.
//!
//! # Features
//!
//! - Blocking HTTP communication with the `/api/generate` endpoint
//! - Structured output through Ollama's `format` field (a JSON schema)
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use eventframe_llm::OllamaProvider;
//! use eventframe_domain::traits::LlmProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.1").unwrap();
//! let text = provider.generate("Say hello").unwrap();
//! ```

use crate::transport;
use crate::LlmError;
use eventframe_domain::traits::LlmProvider as LlmProviderTrait;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
    temperature: f32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: transport::client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(1),
            temperature: 0.0,
        })
    }

    /// Create a new Ollama provider at `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay between attempts
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Fit a whole call, every attempt and its backoff included, within `budget`
    ///
    /// Derives the per-request timeout from the current retry settings, so
    /// call it after `with_max_retries`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be rebuilt
    pub fn with_time_budget(mut self, budget: Duration) -> Result<Self, LlmError> {
        let timeout = transport::request_timeout_within(budget, self.max_retries, self.retry_delay);
        debug!("Request timeout {:?} for a {:?} budget", timeout, budget);
        self.client = transport::client(timeout)?;
        Ok(self)
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(&self, prompt: &str, format: Option<serde_json::Value>) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format,
            options: OllamaOptions {
                temperature: self.temperature,
            },
        };

        debug!("Ollama request: {} prompt chars", prompt.chars().count());

        let response: OllamaGenerateResponse = transport::send_json(
            || self.client.post(&url).json(&body),
            &self.model,
            self.max_retries,
            self.retry_delay,
        )?;

        Ok(response.response)
    }
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.request(prompt, None)
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        let format = transport::parse_schema(schema)?;
        self.request(prompt, Some(format))
    }
}
