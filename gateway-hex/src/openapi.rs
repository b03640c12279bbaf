//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use gateway_types::{ErrorPayload, FinancialRequest, FinancialResponse, OperationKind};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Process a payment authorization
#[utoipa::path(
    post,
    path = "/v1/payments/authorization",
    tag = "financial",
    request_body = FinancialRequest,
    responses(
        (status = 200, description = "Operation processed", body = FinancialResponse),
        (status = 400, description = "Unformatted or invalid body", body = ErrorPayload),
        (status = 500, description = "Processor failure", body = ErrorPayload)
    )
)]
async fn authorization() {}

/// Process a payment pre-authorization
#[utoipa::path(
    post,
    path = "/v1/payments/pre_authorization",
    tag = "financial",
    request_body = FinancialRequest,
    responses(
        (status = 200, description = "Operation processed", body = FinancialResponse),
        (status = 400, description = "Unformatted or invalid body", body = ErrorPayload),
        (status = 500, description = "Processor failure", body = ErrorPayload)
    )
)]
async fn pre_authorization() {}

/// Confirm a previous pre-authorization
#[utoipa::path(
    post,
    path = "/v1/payments/confirmation",
    tag = "financial",
    request_body = FinancialRequest,
    responses(
        (status = 200, description = "Operation processed", body = FinancialResponse),
        (status = 400, description = "Unformatted or invalid body", body = ErrorPayload),
        (status = 500, description = "Processor failure", body = ErrorPayload)
    )
)]
async fn confirmation() {}

/// Cancel a previous operation
#[utoipa::path(
    post,
    path = "/v1/payments/cancellation",
    tag = "financial",
    request_body = FinancialRequest,
    responses(
        (status = 200, description = "Operation processed", body = FinancialResponse),
        (status = 400, description = "Unformatted or invalid body", body = ErrorPayload),
        (status = 500, description = "Processor failure", body = ErrorPayload)
    )
)]
async fn cancellation() {}

/// Reverse an operation with unknown outcome
#[utoipa::path(
    post,
    path = "/v1/payments/reversal",
    tag = "financial",
    request_body = FinancialRequest,
    responses(
        (status = 200, description = "Operation processed", body = FinancialResponse),
        (status = 400, description = "Unformatted or invalid body", body = ErrorPayload),
        (status = 500, description = "Processor failure", body = ErrorPayload)
    )
)]
async fn reversal() {}

/// OpenAPI documentation for the payment gateway.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payment Gateway API",
        version = "1.0.0",
        description = "HTTP front end for card payment operations.\n\nEvery operation accepts the same JSON body and answers `{\"response_code\": ...}` on success. Failures use a single error payload:\n\n```\n{\"status_code\": 400, \"message\": \"invalid body\", \"details\": {\"amount\": \"amount is required\"}}\n```",
        license(name = "MIT"),
    ),
    paths(
        health,
        authorization,
        pre_authorization,
        confirmation,
        cancellation,
        reversal,
    ),
    components(
        schemas(
            FinancialRequest,
            FinancialResponse,
            ErrorPayload,
            OperationKind,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "financial", description = "Authorization, pre-authorization, confirmation, cancellation and reversal"),
    )
)]
pub struct ApiDoc;
