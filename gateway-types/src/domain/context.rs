//! Per-request processing context handed to domain processors.

use std::time::{Duration, Instant};

use super::operation::OperationKind;

/// Context for a single domain call.
///
/// Carries the correlation id and the deadline the caller is willing to
/// wait. Processors doing IO should stop work once `deadline` passes;
/// the HTTP adapter abandons the call at that point regardless.
#[derive(Debug, Clone)]
pub struct ProcessingContext {
    pub operation: OperationKind,
    pub request_id: String,
    pub deadline: Instant,
}

impl ProcessingContext {
    /// Creates a context whose deadline is `timeout` from now.
    pub fn new(operation: OperationKind, request_id: impl Into<String>, timeout: Duration) -> Self {
        Self {
            operation,
            request_id: request_id.into(),
            deadline: Instant::now() + timeout,
        }
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }
}
