//! Parse oracle output into positional labels

use crate::error::AnnotatorError;
use crate::types::OracleLabel;
use serde_json::Value;
use tracing::warn;

/// Parse an oracle response
///
/// Accepts `{"results": [...]}` or a bare array of result objects, optionally
/// wrapped in a markdown code fence. Entries that are not objects are kept as
/// empty labels so later positions stay aligned.
pub fn parse_oracle_response(response: &str) -> Result<Vec<OracleLabel>, AnnotatorError> {
    let json_str = extract_json(response);

    let json: Value = serde_json::from_str(json_str)
        .map_err(|e| AnnotatorError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let entries = match json {
        Value::Array(entries) => entries,
        Value::Object(mut obj) => match obj.remove("results") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(AnnotatorError::InvalidFormat(
                    "Expected a \"results\" array".to_string(),
                ))
            }
        },
        _ => {
            return Err(AnnotatorError::InvalidFormat(
                "Expected a JSON object or array".to_string(),
            ))
        }
    };

    let labels = entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| {
            serde_json::from_value::<OracleLabel>(entry).unwrap_or_else(|e| {
                warn!("Result {} is malformed: {}", idx, e);
                OracleLabel::default()
            })
        })
        .collect();

    Ok(labels)
}

/// Strip a surrounding markdown code fence, if any
fn extract_json(response: &str) -> &str {
    let mut trimmed = response.trim();

    if let Some(rest) = trimmed.strip_prefix("```json") {
        trimmed = rest;
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        trimmed = rest;
    }
    if let Some(rest) = trimmed.strip_suffix("```") {
        trimmed = rest;
    }

    trimmed.trim()
}
