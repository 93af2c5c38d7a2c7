//! Lenient JSON extraction from model output.
//!
//! Models wrap JSON in prose or code fences. Extraction starts at the first
//! `{` or `[` (whichever comes first) and parses exactly one JSON value from
//! there; anything after that value is ignored.

use serde_json::Value;

use crate::error::{PlannerError, Result};

/// Pull the first JSON value out of `text`.
///
/// Fails with `MalformedResponse` when the text holds no `{` or `[`, or when
/// the value starting there is not valid JSON.
pub fn extract_json(text: &str) -> Result<Value> {
    let start = [text.find('{'), text.find('[')]
        .into_iter()
        .flatten()
        .min()
        .ok_or_else(|| PlannerError::MalformedResponse("no JSON object or array found".to_string()))?;

    let candidate = text[start..].trim();
    match serde_json::Deserializer::from_str(candidate).into_iter::<Value>().next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(err)) => Err(PlannerError::MalformedResponse(err.to_string())),
        None => Err(PlannerError::MalformedResponse("empty JSON payload".to_string())),
    }
}
