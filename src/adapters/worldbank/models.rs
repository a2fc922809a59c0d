//! World Bank API payload parsing
//!
//! Every indicator response is a top-level array: element 0 is paging
//! metadata, element 1 the observations. Error responses are a one-element
//! array carrying a `message` list instead.

use crate::domain::{RawObservation, SourceError};
use serde_json::Value;

/// Paging metadata (element 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub pages: u32,
}

/// One decoded page of an indicator response
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPage {
    pub info: PageInfo,
    pub observations: Vec<RawObservation>,
}

/// The API is inconsistent about numbers vs numeric strings in metadata
fn lenient_u32(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn error_message(payload: &[Value]) -> Option<String> {
    let messages = payload.first()?.get("message")?.as_array()?;
    let text: Vec<String> = messages
        .iter()
        .filter_map(|m| m.get("value").and_then(Value::as_str))
        .map(str::to_string)
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(text.join("; "))
    }
}

/// Decode a response body into a page
///
/// # Errors
///
/// Returns [`SourceError::MalformedPayload`] when the body is not a
/// two-element array whose second element is an array (or null, which the API
/// sends for "no data").
pub fn parse_indicator_payload(body: &Value) -> Result<IndicatorPage, SourceError> {
    let payload = body
        .as_array()
        .ok_or_else(|| SourceError::MalformedPayload("expected a top-level array".to_string()))?;

    if payload.len() < 2 {
        let detail = error_message(payload)
            .unwrap_or_else(|| format!("expected 2 elements, got {}", payload.len()));
        return Err(SourceError::MalformedPayload(detail));
    }

    let meta = &payload[0];
    let info = PageInfo {
        page: lenient_u32(meta.get("page")).unwrap_or(1),
        pages: lenient_u32(meta.get("pages")).unwrap_or(1),
    };

    let entries = match &payload[1] {
        Value::Array(entries) => entries.as_slice(),
        Value::Null => &[],
        other => {
            return Err(SourceError::MalformedPayload(format!(
                "expected observations array, got {}",
                json_type(other)
            )))
        }
    };

    let mut observations = Vec::with_capacity(entries.len());
    for entry in entries {
        match serde_json::from_value::<RawObservation>(entry.clone()) {
            Ok(obs) => observations.push(obs),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping undecodable observation entry");
            }
        }
    }

    Ok(IndicatorPage { info, observations })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
