//! Pending verification entity for email-based signup.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An in-flight email verification attempt
///
/// Records are immutable once written. The raw secret handed to the user is
/// never stored, only its fingerprint. A record is destroyed exactly once:
/// either by a successful redemption or by the expiry sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingVerification {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Claimed address (normalized, not yet proven)
    pub email: String,

    /// Hex SHA-256 fingerprint of the one-time secret
    pub token_fingerprint: String,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the token can no longer be redeemed
    pub expires_at: DateTime<Utc>,
}

impl PendingVerification {
    /// Creates a new pending verification expiring `ttl` after `created_at`
    ///
    /// # Arguments
    ///
    /// * `email` - The normalized address being verified
    /// * `token_fingerprint` - Fingerprint of the secret sent to that address
    /// * `created_at` - Issue time
    /// * `ttl` - How long the token stays redeemable
    pub fn new(
        email: impl Into<String>,
        token_fingerprint: impl Into<String>,
        created_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            token_fingerprint: token_fingerprint.into(),
            created_at,
            expires_at: created_at
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Whether the record can still be redeemed at `now`
    ///
    /// The boundary is exclusive: at exactly `expires_at` the token is dead.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Time remaining until expiration, or zero if already expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
