//! Shapes shared across endpoints.

use serde::Deserialize;
use serde_json::Value;

/// `{"acknowledged": true}` style responses.
#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct AcknowledgedResponse {
    #[serde(default)]
    pub acknowledged: bool,
}

/// Error body returned with non-2xx statuses.
///
/// `error` is either an object with `type`/`reason` or a plain string.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Value,
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Render as `type: reason`, falling back to the raw error value.
    pub fn message(&self) -> String {
        match &self.error {
            Value::String(s) => s.clone(),
            Value::Object(map) => {
                let kind = map.get("type").and_then(Value::as_str);
                let reason = map.get("reason").and_then(Value::as_str);
                match (kind, reason) {
                    (Some(kind), Some(reason)) => format!("{kind}: {reason}"),
                    (None, Some(reason)) => reason.to_string(),
                    (Some(kind), None) => kind.to_string(),
                    (None, None) => self.error.to_string(),
                }
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_object() {
        let body: ErrorResponse = serde_json::from_str(
            r#"{"error":{"type":"index_not_found_exception","reason":"no such index [x]"},"status":404}"#,
        )
        .unwrap();
        assert_eq!(body.message(), "index_not_found_exception: no such index [x]");
        assert_eq!(body.status, Some(404));
    }

    #[test]
    fn test_error_message_from_string() {
        let body: ErrorResponse = serde_json::from_str(r#"{"error":"Incorrect HTTP method"}"#).unwrap();
        assert_eq!(body.message(), "Incorrect HTTP method");
    }
}
