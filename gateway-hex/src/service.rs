//! Stub Payment Processor
//!
//! Answers every operation with a fixed response code.
//! Contains NO payment logic - it stands in for a real switch adapter.

use gateway_types::{
    FinancialRequest, FinancialResponse, PaymentProcessor, ProcessingContext, ProcessingError,
};

/// Response code meaning "approved".
pub const APPROVED: &str = "00";

/// Processor that approves (or answers a configured code to) every request.
#[derive(Debug, Clone)]
pub struct StubProcessor {
    response_code: String,
}

impl StubProcessor {
    /// Creates a stub answering `response_code`.
    pub fn new(response_code: impl Into<String>) -> Self {
        Self {
            response_code: response_code.into(),
        }
    }
}

impl Default for StubProcessor {
    fn default() -> Self {
        Self::new(APPROVED)
    }
}

#[async_trait::async_trait]
impl PaymentProcessor for StubProcessor {
    async fn process(
        &self,
        ctx: &ProcessingContext,
        req: FinancialRequest,
    ) -> Result<FinancialResponse, ProcessingError> {
        if ctx.is_expired() {
            return Err(ProcessingError::DeadlineExceeded);
        }

        tracing::debug!(
            operation = %ctx.operation,
            request_id = %ctx.request_id,
            mti = %req.mti,
            amount = %req.amount,
            "stub processor answering {}",
            self.response_code
        );

        Ok(FinancialResponse::new(self.response_code.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gateway_types::OperationKind;

    use super::*;

    #[tokio::test]
    async fn test_default_stub_approves() {
        let ctx = ProcessingContext::new(OperationKind::Authorization, "r1", Duration::from_secs(1));
        let resp = StubProcessor::default()
            .process(&ctx, FinancialRequest::default())
            .await
            .unwrap();
        assert_eq!(resp, FinancialResponse::new("00"));
    }

    #[tokio::test]
    async fn test_configured_code() {
        let ctx = ProcessingContext::new(OperationKind::Reversal, "r2", Duration::from_secs(1));
        let resp = StubProcessor::new("05")
            .process(&ctx, FinancialRequest::default())
            .await
            .unwrap();
        assert_eq!(resp.response_code, "05");
    }

    #[tokio::test]
    async fn test_expired_context_is_rejected() {
        let ctx = ProcessingContext::new(OperationKind::Confirmation, "r3", Duration::ZERO);
        let err = StubProcessor::default()
            .process(&ctx, FinancialRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err, ProcessingError::DeadlineExceeded);
    }
}
