//! Wire-level value types shared by the URL builder, the transport and the
//! endpoint facade.

pub mod catalog;
pub mod params;

pub use catalog::{CoinCatalog, CoinMetadata, normalize_catalog};
pub use params::{ParamValue, QueryParams};

use serde_json::Value;

use crate::error::CryptApiError;

/// A decoded response body: a JSON object with arbitrary values.
pub type ApiResponse = serde_json::Map<String, Value>;

/// Key every response is inspected for.
pub const STATUS_KEY: &str = "status";

/// The only `status` value treated as a valid response.
pub const STATUS_SUCCESS: &str = "success";

/// Whether the response carries `"status": "success"`.
pub fn is_success(response: &ApiResponse) -> bool {
    response.get(STATUS_KEY).and_then(Value::as_str) == Some(STATUS_SUCCESS)
}

/// Human-readable reason a response was rejected.
///
/// Prefers the provider's `error` message and falls back to describing the
/// status that was received.
pub fn failure_reason(response: &ApiResponse) -> String {
    if let Some(message) = response.get("error").and_then(Value::as_str) {
        return message.to_owned();
    }
    match response.get(STATUS_KEY) {
        Some(Value::String(status)) => format!("unexpected status `{status}`"),
        Some(other) => format!("unexpected status {other}"),
        None => "response has no status".to_owned(),
    }
}

/// Decode a response body, requiring a JSON object at the top level.
pub fn decode_body(body: &[u8]) -> Result<ApiResponse, CryptApiError> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(map) => Ok(map),
        other => Err(CryptApiError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
