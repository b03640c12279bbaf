//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::not_blank;

// ─────────────────────────────────────────────────────────────────────────────
// Financial operation DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request body shared by every financial operation.
///
/// Absent fields decode to the empty string so that a missing field is
/// reported by validation rather than as a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct FinancialRequest {
    /// ISO-8583 message type indicator
    #[schema(example = "0100")]
    #[validate(custom(function = "not_blank"))]
    pub mti: String,
    /// ISO-8583 processing code
    #[schema(example = "000000")]
    #[validate(custom(function = "not_blank"))]
    pub processing_code: String,
    /// Amount in the smallest currency unit
    #[schema(example = "1000")]
    #[validate(custom(function = "not_blank"))]
    pub amount: String,
    /// POS entry mode
    #[schema(example = "051")]
    #[validate(custom(function = "not_blank"))]
    pub entry_mode: String,
    /// Track 2 equivalent data
    #[schema(example = "4761739001010010=22122011758928889")]
    #[validate(custom(function = "not_blank"))]
    pub track2: String,
    #[schema(example = "T1")]
    #[validate(custom(function = "not_blank"))]
    pub terminal_id: String,
    #[schema(example = "M1")]
    #[validate(custom(function = "not_blank"))]
    pub merchant_id: String,
}

/// Response returned by every financial operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FinancialResponse {
    /// ISO-8583 response code
    #[schema(example = "00")]
    pub response_code: String,
}

impl FinancialResponse {
    pub fn new(response_code: impl Into<String>) -> Self {
        Self {
            response_code: response_code.into(),
        }
    }
}
