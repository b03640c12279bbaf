//! Domain models for the payment gateway.

pub mod context;
pub mod operation;

pub use context::ProcessingContext;
pub use operation::{OperationKind, UnknownOperation};
