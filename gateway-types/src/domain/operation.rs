//! Financial operation kinds handled by the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// The five financial operations exposed over HTTP.
///
/// Every kind shares the same request/response shape and the same
/// handling pipeline. They differ only in route and in the processor
/// that serves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Authorize and capture in one step
    Authorization,
    /// Reserve funds without capturing
    PreAuthorization,
    /// Capture a previous pre-authorization
    Confirmation,
    /// Cancel a previously approved operation
    Cancellation,
    /// Undo an operation whose outcome is unknown to the terminal
    Reversal,
}

impl OperationKind {
    /// All operation kinds, in route registration order.
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Authorization,
        OperationKind::PreAuthorization,
        OperationKind::Confirmation,
        OperationKind::Cancellation,
        OperationKind::Reversal,
    ];

    /// The snake_case name used in paths and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Authorization => "authorization",
            OperationKind::PreAuthorization => "pre_authorization",
            OperationKind::Confirmation => "confirmation",
            OperationKind::Cancellation => "cancellation",
            OperationKind::Reversal => "reversal",
        }
    }

    /// The HTTP route serving this operation.
    pub fn path(&self) -> &'static str {
        match self {
            OperationKind::Authorization => "/v1/payments/authorization",
            OperationKind::PreAuthorization => "/v1/payments/pre_authorization",
            OperationKind::Confirmation => "/v1/payments/confirmation",
            OperationKind::Cancellation => "/v1/payments/cancellation",
            OperationKind::Reversal => "/v1/payments/reversal",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown operation name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation '{0}'")]
pub struct UnknownOperation(pub String);

impl std::str::FromStr for OperationKind {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_under_payments_prefix() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.path(), format!("/v1/payments/{}", kind.as_str()));
        }
    }

    #[test]
    fn test_parse_accepts_dashes_and_case() {
        assert_eq!(
            "Pre-Authorization".parse::<OperationKind>(),
            Ok(OperationKind::PreAuthorization)
        );
        assert_eq!("reversal".parse::<OperationKind>(), Ok(OperationKind::Reversal));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "refund".parse::<OperationKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown operation 'refund'");
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&OperationKind::PreAuthorization).unwrap();
        assert_eq!(json, "\"pre_authorization\"");
    }
}
