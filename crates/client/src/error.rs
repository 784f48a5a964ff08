//! Errors returned by the API client

use complyform_core::ComplyError;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx response
    #[error("API error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api {
        /// HTTP status code
        status: u16,
        /// Message extracted from the `detail` field of the body
        detail: Option<String>,
    },

    /// Failed to deserialise the response body
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The configured base URL or a path could not be turned into a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Local validation or an unsupported operation, before any request
    #[error(transparent)]
    Local(#[from] ComplyError),
}

impl ClientError {
    /// Build an `Api` error from a status code and the raw body
    pub fn from_body(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| extract_detail(&v));
        Self::Api { status, detail }
    }

    /// Whether this is a "not found" (404) error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Whether the server rejected the payload (422)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Api { status: 422, .. })
            || matches!(self, Self::Local(e) if e.is_validation())
    }

    /// Message provided by the server or by local validation, if any
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Api { detail, .. } => detail.clone(),
            Self::Local(e) => Some(e.to_string()),
            _ => None,
        }
    }

    /// Server-provided detail, else the given fallback
    pub fn detail_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or_else(|| fallback.to_string())
    }

    /// Get the user-facing error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(e) => {
                if e.is_timeout() {
                    "Request timed out. Please try again.".to_string()
                } else if e.is_connect() {
                    "Unable to connect to the server. Please check your connection.".to_string()
                } else {
                    "An unexpected network error occurred.".to_string()
                }
            }
            Self::Api { status, detail } => detail
                .clone()
                .unwrap_or_else(|| format!("The server returned an error ({status}).")),
            Self::Parse(_) => "Received an unexpected response from the server.".to_string(),
            Self::InvalidUrl(url) => format!("The API address is not valid: {url}"),
            Self::Local(e) => e.to_string(),
        }
    }
}

/// Result type alias using ClientError
pub type ClientResult<T> = Result<T, ClientError>;

/// Pull a readable message out of a `{"detail": ...}` body
///
/// A string detail is used verbatim; a validation list is joined from the
/// `msg` entries of its items.
pub fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_string_detail_is_verbatim() {
        let body = json!({"detail": "Compliance rule not found"});
        assert_eq!(
            extract_detail(&body),
            Some("Compliance rule not found".to_string())
        );
    }

    #[test]
    fn test_validation_list_is_joined() {
        let body = json!({"detail": [
            {"loc": ["body", "rule_name"], "msg": "field required", "type": "missing"},
            {"loc": ["body", "jurisdiction_id"], "msg": "value is not a valid uuid"}
        ]});
        assert_eq!(
            extract_detail(&body),
            Some("field required; value is not a valid uuid".to_string())
        );
    }

    #[test]
    fn test_missing_or_empty_detail() {
        assert_eq!(extract_detail(&json!({"error": "boom"})), None);
        assert_eq!(extract_detail(&json!({"detail": []})), None);
        assert_eq!(extract_detail(&json!({"detail": "  "})), None);
    }

    #[test]
    fn test_from_body_with_non_json() {
        let err = ClientError::from_body(502, "<html>Bad Gateway</html>");
        assert!(matches!(err, ClientError::Api { status: 502, detail: None }));
        assert_eq!(err.detail_or("Failed to create rule"), "Failed to create rule");
        assert_eq!(err.user_message(), "The server returned an error (502).");
    }

    #[test]
    fn test_classifiers() {
        let err = ClientError::from_body(404, r#"{"detail": "Organization not found"}"#);
        assert!(err.is_not_found());
        assert_eq!(err.detail_or("fallback"), "Organization not found");

        let err = ClientError::from(ComplyError::field("Rule name", "is required"));
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Rule name: is required");
    }
}
