//! # Gateway Hex
//!
//! Payment processors and HTTP adapter for the payment gateway.
//!
//! ## Architecture
//!
//! - `service/` - Stub processor implementing the processor port
//! - `inbound/` - HTTP adapter (Axum server, response builder, handlers)
//!
//! The server is built from a `ProcessorRegistry`, allowing different
//! processor implementations to be injected per operation kind.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod handler_tests;

pub use service::StubProcessor;
