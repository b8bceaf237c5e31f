//! EventFrame LLM Provider Layer
//!
//! Oracle implementations of the `LlmProvider` trait from `eventframe-domain`.
//! The annotation pipeline labels corpus batches through whichever provider
//! it is handed.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! All HTTP providers are blocking; async callers run them on a blocking
//! task.
//!
//! # Examples
//!
//! ```
//! use eventframe_llm::MockProvider;
//! use eventframe_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod ollama;
mod transport;

use eventframe_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be built (bad schema, bad client settings)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Scripted entries are keyed by substring: the first entry whose key occurs
/// in the prompt wins, so a test can target one batch by one of its texts.
///
/// # Examples
///
/// ```
/// use eventframe_llm::MockProvider;
/// use eventframe_domain::traits::LlmProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt").unwrap(), "Fixed response");
///
/// // Scripted responses
/// let mut provider = MockProvider::default();
/// provider.add_response("alpha", "response1");
/// provider.add_error("beta");
/// assert_eq!(provider.generate("...alpha...").unwrap(), "response1");
/// assert!(provider.generate("...beta...").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<Vec<(String, Scripted)>>>,
    call_count: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Respond with `response` to any prompt containing `key`
    pub fn add_response(&mut self, key: impl Into<String>, response: impl Into<String>) {
        guard(&self.responses).push((key.into(), Scripted::Reply(response.into())));
    }

    /// Fail any prompt containing `key`
    pub fn add_error(&mut self, key: impl Into<String>) {
        let key = key.into();
        let message = format!("Mock error for '{}'", key);
        guard(&self.responses).push((key, Scripted::Fail(message)));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *guard(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *guard(&self.call_count) = 0;
        guard(&self.prompts).clear();
    }

    /// Every prompt received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        guard(&self.prompts).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        *guard(&self.call_count) += 1;
        guard(&self.prompts).push(prompt.to_string());

        let responses = guard(&self.responses);
        let scripted = responses
            .iter()
            .find(|(key, _)| prompt.contains(key.as_str()))
            .map(|(_, scripted)| scripted);

        match scripted {
            Some(Scripted::Reply(response)) => Ok(response.clone()),
            Some(Scripted::Fail(message)) => Err(LlmError::Other(message.clone())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.generate(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_substring_keys() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("say hello please").unwrap(), "world");
        assert_eq!(provider.generate("foo").unwrap(), "bar");
        assert_eq!(provider.generate("unknown").unwrap(), "Default mock response");
    }

    #[test]
    fn test_first_matching_key_wins() {
        let mut provider = MockProvider::default();
        provider.add_response("batch", "first");
        provider.add_error("batch 2");

        assert_eq!(provider.generate("batch 2").unwrap(), "first");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate("prompt2").unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["prompt1", "prompt2"]);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
        assert!(provider.prompts().is_empty());
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate("a bad prompt here");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[test]
    fn test_mock_provider_structured() {
        let provider = MockProvider::new("structured response");
        let result = provider.generate_structured("prompt", "schema");
        assert_eq!(result.unwrap(), "structured response");
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").unwrap();

        // Both share the same call count due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
