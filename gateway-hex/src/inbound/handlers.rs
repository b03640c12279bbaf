//! HTTP request handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json,
    body::Bytes,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde_json::json;

use gateway_types::{
    FinancialRequest, OperationKind, ProcessingContext, ProcessingError, ProcessorRegistry,
    validate,
};

use super::response::{INTERNAL_ERROR, ResponseBuilder, SuccessStatus};

/// Header carrying the correlation id of a request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tunables of the financial handlers.
#[derive(Debug, Clone)]
pub struct HandlerSettings {
    /// How long a processor may take before the call is abandoned
    pub request_timeout: Duration,
    /// Whether processor error text is returned to clients
    pub expose_internal_errors: bool,
}

impl Default for HandlerSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            expose_internal_errors: true,
        }
    }
}

/// Application state shared across handlers.
pub struct AppState {
    pub processors: ProcessorRegistry,
    pub settings: HandlerSettings,
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// Handles one financial operation.
///
/// Decodes the body, validates it, calls the processor registered for
/// `kind` at most once, and answers through [`ResponseBuilder`]. Every
/// failure ends here as an error payload.
#[tracing::instrument(
    skip(kind, state, headers, body),
    fields(
        operation = %kind,
        request_id = tracing::field::Empty,
        terminal_id = tracing::field::Empty,
        merchant_id = tracing::field::Empty,
    )
)]
pub async fn process_operation(
    kind: OperationKind,
    state: Arc<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let span = tracing::Span::current();
    let request_id = request_id(&headers);
    span.record("request_id", request_id.as_str());

    let req: FinancialRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting unformatted body");
            return ResponseBuilder::new().mark_unformatted_body().send();
        }
    };

    span.record("terminal_id", req.terminal_id.as_str());
    span.record("merchant_id", req.merchant_id.as_str());

    if let Err(violations) = validate(&req) {
        tracing::debug!(%violations, "rejecting invalid body");
        return ResponseBuilder::new()
            .mark_invalid_body()
            .set_error_details(&violations)
            .send();
    }

    let ctx = ProcessingContext::new(kind, request_id, state.settings.request_timeout);
    let deadline = tokio::time::Instant::from_std(ctx.deadline);
    let processor = state.processors.get(kind);

    let outcome = tokio::time::timeout_at(deadline, processor.process(&ctx, req))
        .await
        .unwrap_or(Err(ProcessingError::DeadlineExceeded));

    match outcome {
        Ok(resp) => {
            tracing::info!(response_code = %resp.response_code, "operation processed");
            ResponseBuilder::new()
                .set_success_status(SuccessStatus::Ok)
                .set_body(&resp)
                .send()
        }
        Err(err) => {
            tracing::error!(error = %err, "processor failed");
            let message = if state.settings.expose_internal_errors {
                err.to_string()
            } else {
                INTERNAL_ERROR.to_string()
            };
            ResponseBuilder::new()
                .mark_internal_error()
                .set_error_message(message)
                .set_error_details(&json!({ "request_id": ctx.request_id }))
                .send()
        }
    }
}

/// The caller's request id, or a fresh one when absent.
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("req-42"));
        assert_eq!(request_id(&headers), "req-42");
    }

    #[test]
    fn test_request_id_generated_when_missing() {
        let id = request_id(&HeaderMap::new());
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }
}
