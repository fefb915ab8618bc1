//! Verification-specific error types
//!
//! Redemption failures collapse into a single variant. A wrong token, an
//! expired token and an already-used token are indistinguishable to the
//! caller, so a guessed token reveals nothing about whether it ever existed.

use thiserror::Error;

/// User-facing text for a rejected verification link
pub const INVALID_OR_EXPIRED_MESSAGE: &str =
    "This link is invalid or has expired. Please request a new one.";

/// Verification token errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Verification token is invalid or expired")]
    InvalidOrExpired,
}

impl VerificationError {
    /// Message safe to show to the end user
    pub fn user_message(&self) -> &'static str {
        match self {
            VerificationError::InvalidOrExpired => INVALID_OR_EXPIRED_MESSAGE,
        }
    }
}
