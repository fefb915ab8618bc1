//! Types for verification service results

use chrono::{DateTime, Utc};
use std::fmt;

/// Result of issuing a verification token
#[derive(Clone)]
pub struct VerificationRequestResult {
    /// Raw secret; belongs in the outbound link and nowhere else
    pub secret: String,
    /// Normalized address the token is bound to
    pub email: String,
    /// When the token stops being redeemable
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for VerificationRequestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationRequestResult")
            .field("secret", &"[REDACTED]")
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
