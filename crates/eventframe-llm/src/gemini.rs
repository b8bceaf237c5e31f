//! Gemini Provider Implementation
//!
//! Calls `models/{model}:generateContent`. Structured calls set
//! `responseMimeType` to JSON and pass the schema as `responseSchema`.

use crate::transport;
use crate::LlmError;
use eventframe_domain::traits::LlmProvider as LlmProviderTrait;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Response token ceiling
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Hosted Gemini provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated
    fn into_text(self) -> Result<String, LlmError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No candidates returned".to_string()))?;

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
        if parts.is_empty() {
            return Err(LlmError::InvalidResponse(format!(
                "Empty candidate (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(parts.into_iter().map(|p| p.text).collect())
    }
}

impl GeminiProvider {
    /// Create a provider for `model` authenticated with `api_key`
    ///
    /// # Errors
    ///
    /// Returns error if the key is empty or the HTTP client cannot be built
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::InvalidRequest("Gemini API key is empty".to_string()));
        }

        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key,
            client: transport::client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(1),
        })
    }

    /// Override the API base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of attempts per request
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
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

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    fn body<'a>(prompt: &'a str, schema: Option<serde_json::Value>) -> GenerateContentRequest<'a> {
        let structured = schema.is_some();
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: structured.then_some("application/json"),
                response_schema: schema,
            },
        }
    }

    fn request(&self, prompt: &str, schema: Option<serde_json::Value>) -> Result<String, LlmError> {
        let url = self.url();
        let body = Self::body(prompt, schema);

        debug!("Gemini request: {} prompt chars", prompt.chars().count());

        let response: GenerateContentResponse = transport::send_json(
            || {
                self.client
                    .post(&url)
                    .header("x-goog-api-key", &self.api_key)
                    .json(&body)
            },
            &self.model,
            self.max_retries,
            self.retry_delay,
        )?;

        response.into_text()
    }
}

impl LlmProviderTrait for GeminiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.request(prompt, None)
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        let schema = transport::parse_schema(schema)?;
        self.request(prompt, Some(schema))
    }
}
