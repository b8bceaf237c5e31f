//! Blocking JSON POST with exponential backoff, shared by the HTTP providers

use crate::LlmError;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Build a blocking client with a request timeout
pub(crate) fn client(timeout: Duration) -> Result<Client, LlmError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))
}

/// Floor for a per-request timeout derived from a time budget
const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// Per-request timeout that fits every attempt and its backoff within `budget`
pub(crate) fn request_timeout_within(
    budget: Duration,
    max_retries: u32,
    base_delay: Duration,
) -> Duration {
    let attempts = max_retries.max(1);
    // sum of the 1x, 2x, 4x ... delays slept between attempts
    let backoff = base_delay.saturating_mul(2u32.saturating_pow(attempts - 1) - 1);
    (budget.saturating_sub(backoff) / attempts).max(MIN_REQUEST_TIMEOUT)
}

/// Send a request, retrying network failures and 5xx responses
///
/// `build` is called once per attempt. 404 maps to `ModelNotAvailable`,
/// 429 to `RateLimitExceeded`, any other 4xx fails immediately.
pub(crate) fn send_json<T, F>(
    build: F,
    model: &str,
    max_retries: u32,
    base_delay: Duration,
) -> Result<T, LlmError>
where
    T: DeserializeOwned,
    F: Fn() -> RequestBuilder,
{
    let attempts_allowed = max_retries.max(1);
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < attempts_allowed {
        match build().send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return response.json::<T>().map_err(|e| {
                        LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                    });
                }
                if status == StatusCode::NOT_FOUND {
                    return Err(LlmError::ModelNotAvailable(model.to_string()));
                }
                if status == StatusCode::TOO_MANY_REQUESTS {
                    return Err(LlmError::RateLimitExceeded);
                }

                let error_text = response
                    .text()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                let error = LlmError::Communication(format!("HTTP {}: {}", status, error_text));
                if status.is_client_error() {
                    return Err(error);
                }
                last_error = Some(error);
            }
            Err(e) => {
                last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < attempts_allowed {
            // 1x, 2x, 4x the base delay
            let delay = base_delay * 2u32.pow(attempts - 1);
            warn!("Attempt {} failed, retrying in {:?}", attempts, delay);
            std::thread::sleep(delay);
        } else {
            debug!("Giving up after {} attempts", attempts);
        }
    }

    Err(last_error
        .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
}

/// Parse a JSON schema string into a value for embedding in a request
pub(crate) fn parse_schema(schema: &str) -> Result<serde_json::Value, LlmError> {
    serde_json::from_str(schema)
        .map_err(|e| LlmError::InvalidRequest(format!("Schema is not valid JSON: {}", e)))
}
