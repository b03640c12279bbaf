//! # Gateway Types
//!
//! Domain types, validation rules and port traits for the payment gateway.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Operation kinds and the per-request processing context
//! - `ports/` - The processor trait that domain adapters must implement
//! - `dto/` - Request and response bodies of the financial endpoints
//! - `validation/` - Field rules and violation messages for request bodies
//! - `error/` - Processor errors and the wire error payload

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod validation;

// Re-export commonly used types
pub use domain::{OperationKind, ProcessingContext, UnknownOperation};
pub use dto::*;
pub use error::{ErrorPayload, ProcessingError};
pub use ports::{MissingProcessors, PaymentProcessor, ProcessorRegistry};
pub use validation::{Rule, Validate, ValidationErrors, validate};
