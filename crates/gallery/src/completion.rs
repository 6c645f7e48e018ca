use serde_json::Value;
use targets::collected::CollectedSet;

use crate::FetchError;

/// Decodes a completion document: a JSON object whose keys are the collected
/// target ids. Values carry per-target details that the engine ignores.
pub fn parse_completion(text: &str) -> Result<CollectedSet, FetchError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| FetchError::Format(format!("completion: {e}")))?;
    completion_from_value(&value)
}

pub fn completion_from_value(value: &Value) -> Result<CollectedSet, FetchError> {
    match value {
        Value::Object(map) => Ok(map.keys().map(String::as_str).collect()),
        other => Err(FetchError::Format(format!(
            "completion must be a JSON object, got {other}"
        ))),
    }
}
