//! # Gateway Client SDK
//!
//! A typed Rust client for the payment gateway API.

use gateway_types::{ErrorPayload, FinancialRequest, FinancialResponse, OperationKind};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Payment gateway API client.
pub struct GatewayClient {
    base_url: String,
    http: Client,
}

impl GatewayClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Submits `req` to the endpoint of `kind`.
    pub async fn process(
        &self,
        kind: OperationKind,
        req: &FinancialRequest,
    ) -> Result<FinancialResponse, ClientError> {
        self.post(kind.path(), req).await
    }

    pub async fn authorize(&self, req: &FinancialRequest) -> Result<FinancialResponse, ClientError> {
        self.process(OperationKind::Authorization, req).await
    }

    pub async fn pre_authorize(
        &self,
        req: &FinancialRequest,
    ) -> Result<FinancialResponse, ClientError> {
        self.process(OperationKind::PreAuthorization, req).await
    }

    pub async fn confirm(&self, req: &FinancialRequest) -> Result<FinancialResponse, ClientError> {
        self.process(OperationKind::Confirmation, req).await
    }

    pub async fn cancel(&self, req: &FinancialRequest) -> Result<FinancialResponse, ClientError> {
        self.process(OperationKind::Cancellation, req).await
    }

    pub async fn reverse(&self, req: &FinancialRequest) -> Result<FinancialResponse, ClientError> {
        self.process(OperationKind::Reversal, req).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(api_error(status.as_u16(), body))
        }
    }
}

/// Builds an [`ClientError::Api`] from an error response body.
///
/// Bodies that are not an error payload are passed through as the message.
fn api_error(status: u16, body: String) -> ClientError {
    match serde_json::from_str::<ErrorPayload>(&body) {
        Ok(payload) => ClientError::Api {
            status: payload.status_code(),
            message: payload.message().to_string(),
            details: payload.details().cloned(),
        },
        Err(_) => ClientError::Api {
            status,
            message: body,
            details: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GatewayClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = GatewayClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_api_error_from_payload() {
        let body = r#"{"status_code":400,"message":"invalid body","details":{"mti":"mti is required"}}"#;
        match api_error(400, body.to_string()) {
            ClientError::Api {
                status,
                message,
                details,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "invalid body");
                assert_eq!(details.unwrap()["mti"], "mti is required");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_api_error_from_plain_body() {
        match api_error(502, "Bad Gateway".to_string()) {
            ClientError::Api {
                status,
                message,
                details,
            } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
                assert!(details.is_none());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
