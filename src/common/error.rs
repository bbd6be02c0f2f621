// Error handling types for the client

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::notify::Notification;
use super::validation::ValidationResult;

/// Why a session was rejected by the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    Missing,
    Malformed,
    Expired,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::Missing => write!(f, "no session token"),
            AuthFailure::Malformed => write!(f, "session token could not be decoded"),
            AuthFailure::Expired => write!(f, "session token has expired"),
        }
    }
}

/// Client error types
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Session invalid: {0}")]
    AuthInvalid(AuthFailure),

    #[error("Request failed with HTTP {}{}", .status, detail_suffix(.detail))]
    RequestFailed {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("Validation Error: {0}")]
    ValidationFailed(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Realtime channel error: {0}")]
    Realtime(String),
}

/// FastAPI error body: `detail` is a string for HTTPException and a list of
/// `{loc, msg, type}` entries for request validation failures.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ClientError {
    /// Build a `RequestFailed` from a non-2xx status and the raw response body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| detail_text(&b.detail));

        debug!(status = %status, detail = ?detail, "Non-success response");

        ClientError::RequestFailed { status, detail }
    }

    pub fn is_auth_invalid(&self) -> bool {
        matches!(self, ClientError::AuthInvalid(_))
    }

    /// Notification to show for this error, or `None` when the error is
    /// handled by redirecting to login instead.
    pub fn notification(&self, fallback: &str) -> Option<Notification> {
        match self {
            ClientError::AuthInvalid(_) => None,
            ClientError::RequestFailed { detail, .. } => Some(Notification::error(
                "Error",
                detail.clone().unwrap_or_else(|| fallback.to_string()),
            )),
            ClientError::ValidationFailed(msg) => {
                Some(Notification::error("Validation", msg.clone()))
            }
            _ => Some(Notification::error("Error", fallback)),
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {}", d)).unwrap_or_default()
}

fn detail_text(detail: &serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join(", "))
            }
        }
        _ => None,
    }
}

impl From<ValidationResult> for ClientError {
    fn from(result: ValidationResult) -> Self {
        let messages: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        ClientError::ValidationFailed(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::notify::Variant;

    #[test]
    fn test_string_detail_is_extracted() {
        let err = ClientError::from_response(StatusCode::NOT_FOUND, r#"{"detail":"not found"}"#);
        match &err {
            ClientError::RequestFailed { status, detail } => {
                assert_eq!(*status, StatusCode::NOT_FOUND);
                assert_eq!(detail.as_deref(), Some("not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let n = err.notification("Failed to delete").unwrap();
        assert_eq!(n.description.as_deref(), Some("not found"));
        assert_eq!(n.variant, Variant::Destructive);
    }

    #[test]
    fn test_validation_list_detail_is_joined() {
        let body = r#"{"detail":[{"loc":["body","price"],"msg":"value is not a valid float","type":"type_error.float"},{"loc":["body","stock"],"msg":"field required","type":"value_error.missing"}]}"#;
        let err = ClientError::from_response(StatusCode::UNPROCESSABLE_ENTITY, body);
        let n = err.notification("Failed to save").unwrap();
        assert_eq!(
            n.description.as_deref(),
            Some("value is not a valid float, field required")
        );
    }

    #[test]
    fn test_missing_detail_uses_fallback() {
        let err = ClientError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        let n = err.notification("Failed to load orders").unwrap();
        assert_eq!(n.description.as_deref(), Some("Failed to load orders"));
    }

    #[test]
    fn test_auth_invalid_is_never_notified() {
        let err = ClientError::AuthInvalid(AuthFailure::Expired);
        assert!(err.notification("anything").is_none());
        assert!(err.is_auth_invalid());
    }

    #[test]
    fn test_validation_result_conversion() {
        let mut result = ValidationResult::new();
        result.add_error("name", "must not be empty");
        result.add_error("price", "must not be negative");

        let err: ClientError = result.into();
        assert_eq!(
            err.to_string(),
            "Validation Error: name: must not be empty, price: must not be negative"
        );
    }
}
