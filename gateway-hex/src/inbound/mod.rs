//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the payment processors.

mod handlers;
mod response;
mod server;

pub use handlers::{AppState, HandlerSettings, REQUEST_ID_HEADER, health, process_operation};
pub use response::{
    INTERNAL_ERROR, INVALID_BODY, JSON_CONTENT_TYPE, Reply, ResponseBuilder, SuccessStatus,
    UNFORMATTED_BODY,
};
pub use server::HttpServer;
