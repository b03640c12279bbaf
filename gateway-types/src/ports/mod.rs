//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The HTTP layer depends on these traits, not concrete implementations.

mod processor;

pub use processor::{MissingProcessors, PaymentProcessor, ProcessorRegistry, ProcessorRegistryBuilder};
