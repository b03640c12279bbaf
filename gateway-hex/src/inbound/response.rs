//! Uniform JSON response construction.
//!
//! Every endpoint answers through [`ResponseBuilder`], so success bodies,
//! error payloads and headers look the same everywhere. The builder is
//! consumed by [`ResponseBuilder::send`]; it cannot be reused.

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use gateway_types::ErrorPayload;

/// Content type of every response produced by the builder.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub const UNFORMATTED_BODY: &str = "unformatted body";
pub const INVALID_BODY: &str = "invalid body";
pub const INTERNAL_ERROR: &str = "internal error";

/// Last-resort body if the error payload itself cannot be encoded.
const FALLBACK_ERROR_BODY: &[u8] =
    br#"{"status_code":500,"message":"internal error","details":null}"#;

/// Success statuses the builder can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessStatus {
    Ok,
    Created,
}

impl From<SuccessStatus> for StatusCode {
    fn from(status: SuccessStatus) -> Self {
        match status {
            SuccessStatus::Ok => StatusCode::OK,
            SuccessStatus::Created => StatusCode::CREATED,
        }
    }
}

/// What a finished builder resolves to before anything is rendered.
#[derive(Debug)]
pub enum Reply {
    /// Already-encoded success body, written as is.
    Success { status: StatusCode, body: Bytes },
    /// Rendered as an [`ErrorPayload`].
    Failure(ErrorPayload),
}

/// Fluent builder for exactly one HTTP response.
#[derive(Debug, Default)]
#[must_use = "a response builder does nothing until `send` is called"]
pub struct ResponseBuilder {
    status: Option<StatusCode>,
    body: Option<Result<Bytes, serde_json::Error>>,
    headers: HeaderMap,
    error_message: Option<String>,
    error_details: Option<serde_json::Value>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a 200 or 201 status.
    pub fn set_success_status(mut self, status: SuccessStatus) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Stages the success body.
    ///
    /// The value is encoded right away, so an encoding failure is known
    /// before any part of the response exists.
    pub fn set_body<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_vec(body).map(Bytes::from));
        self
    }

    /// Stages extra headers, added next to the standard ones on send.
    pub fn set_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// 400 for a payload that could not be decoded.
    pub fn mark_unformatted_body(self) -> Self {
        self.fail(StatusCode::BAD_REQUEST, UNFORMATTED_BODY)
    }

    /// 400 for a payload that decoded but failed validation.
    pub fn mark_invalid_body(self) -> Self {
        self.fail(StatusCode::BAD_REQUEST, INVALID_BODY)
    }

    /// 500 for unexpected failures.
    pub fn mark_internal_error(self) -> Self {
        self.fail(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    }

    /// Replaces the error message, keeping the status.
    pub fn set_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Attaches structured details to the error payload.
    pub fn set_error_details<T: Serialize + ?Sized>(mut self, details: &T) -> Self {
        match serde_json::to_value(details) {
            Ok(value) => self.error_details = Some(value),
            Err(e) => tracing::warn!(error = %e, "dropping error details that failed to encode"),
        }
        self
    }

    fn fail(mut self, status: StatusCode, message: &str) -> Self {
        self.status = Some(status);
        self.error_message = Some(message.to_string());
        self
    }

    /// Resolves the staged state into extra headers and a [`Reply`].
    ///
    /// Status >= 400 yields a failure carrying the staged message and
    /// details. Otherwise the staged body is used (JSON `null` when none was
    /// staged). An unset status means 200.
    pub fn into_reply(self) -> (HeaderMap, Reply) {
        let status = self.status.unwrap_or(StatusCode::OK);

        let reply = if status.as_u16() >= 400 {
            let message = self.error_message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or(INTERNAL_ERROR)
                    .to_lowercase()
            });
            Reply::Failure(ErrorPayload::new(status.as_u16(), message, self.error_details))
        } else {
            match self.body {
                None => Reply::Success {
                    status,
                    body: Bytes::from_static(b"null"),
                },
                Some(Ok(body)) => Reply::Success { status, body },
                Some(Err(e)) => {
                    tracing::error!(error = %e, "failed to encode response body");
                    Reply::Failure(ErrorPayload::new(
                        StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                        INTERNAL_ERROR,
                        None,
                    ))
                }
            }
        };

        (self.headers, reply)
    }

    /// Renders the response. This is the only place output is produced.
    pub fn send(self) -> Response {
        let (extra_headers, reply) = self.into_reply();

        let (status, body) = match reply {
            Reply::Success { status, body } => (status, body),
            Reply::Failure(payload) => {
                let status = StatusCode::from_u16(payload.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let body = serde_json::to_vec(&payload)
                    .map(Bytes::from)
                    .unwrap_or_else(|_| Bytes::from_static(FALLBACK_ERROR_BODY));
                (status, body)
            }
        };

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        headers.extend(extra_headers);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );

        response
    }
}

impl IntoResponse for ResponseBuilder {
    fn into_response(self) -> Response {
        self.send()
    }
}
