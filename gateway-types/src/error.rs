//! Error types for the payment gateway.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Failures reported by a payment processor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessingError {
    #[error("operation declined: {0}")]
    Declined(String),

    #[error("processor unavailable: {0}")]
    Unavailable(String),

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("{0}")]
    Internal(String),
}

/// Canonical JSON body for every 4xx/5xx response.
///
/// `status_code` is always an error status: anything below 400 is
/// recorded as 500, including when decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "WireErrorPayload")]
pub struct ErrorPayload {
    #[schema(example = 400)]
    status_code: u16,
    #[schema(example = "invalid body")]
    message: String,
    #[schema(value_type = Option<Object>, example = json!({"amount": "amount is required"}))]
    details: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct WireErrorPayload {
    status_code: u16,
    message: String,
    details: Option<serde_json::Value>,
}

impl From<WireErrorPayload> for ErrorPayload {
    fn from(wire: WireErrorPayload) -> Self {
        ErrorPayload::new(wire.status_code, wire.message, wire.details)
    }
}

impl ErrorPayload {
    pub fn new(
        status_code: u16,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        let status_code = if status_code < 400 { 500 } else { status_code };
        Self {
            status_code,
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }
}

impl std::fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status_code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_always_carries_details_key() {
        let payload = ErrorPayload::new(400, "unformatted body", None);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status_code": 400,
                "message": "unformatted body",
                "details": null
            })
        );
    }

    #[test]
    fn test_success_status_is_coerced_to_internal_error() {
        let payload = ErrorPayload::new(200, "oops", None);
        assert_eq!(payload.status_code(), 500);
    }

    #[test]
    fn test_decoding_applies_the_same_coercion() {
        let payload: ErrorPayload =
            serde_json::from_str(r#"{"status_code":201,"message":"created?"}"#).unwrap();
        assert_eq!(payload.status_code(), 500);
        assert_eq!(payload.message(), "created?");
        assert!(payload.details().is_none());

        let payload: ErrorPayload = serde_json::from_str(
            r#"{"status_code":404,"message":"not found","details":{"path":"/x"}}"#,
        )
        .unwrap();
        assert_eq!(payload.status_code(), 404);
        assert_eq!(payload.details().unwrap()["path"], "/x");
    }

    #[test]
    fn test_internal_error_displays_inner_text() {
        let err = ProcessingError::Internal("switch offline".into());
        assert_eq!(err.to_string(), "switch offline");
        assert_eq!(ProcessingError::DeadlineExceeded.to_string(), "deadline exceeded");
    }
}
