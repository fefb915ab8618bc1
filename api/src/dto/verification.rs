use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestVerificationRequest {
    /// Address to verify; surrounding whitespace and case are normalized
    /// before the format check
    #[validate(length(min = 1, max = 320, message = "Email must be between 1 and 320 characters"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestVerificationResponse {
    pub message: String,
    pub expires_in: i64, // seconds the emailed link stays valid
}

/// Body form of redemption; blank tokens are rejected as invalid, not as
/// malformed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemResponse {
    pub email: String,
    pub confirmed_at: DateTime<Utc>,
}
