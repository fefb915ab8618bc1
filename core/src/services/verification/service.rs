//! Main verification service implementation

use chrono::Duration;
use std::sync::Arc;

use ea_shared::config::verification::{clamp_token_ttl_minutes, DEFAULT_TOKEN_TTL_MINUTES};
use ea_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::ConfirmedEmail;
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::{ConfirmedEmailRepository, PendingVerificationRepository};
use crate::services::clock::{Clock, SystemClock};
use crate::services::token::{TokenCodec, MAX_SECRET_LENGTH};

use super::config::VerificationServiceConfig;
use super::types::VerificationRequestResult;

/// Verification service for issuing and redeeming email verification tokens
pub struct VerificationService<P: PendingVerificationRepository, C: ConfirmedEmailRepository> {
    /// Custody of in-flight tokens
    pending: Arc<P>,
    /// Addresses proven reachable
    confirmed: Arc<C>,
    /// Source of "now"
    clock: Arc<dyn Clock>,
    /// Secret generation
    codec: TokenCodec,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<P: PendingVerificationRepository, C: ConfirmedEmailRepository> VerificationService<P, C> {
    /// Create a new verification service on the system clock
    ///
    /// # Arguments
    ///
    /// * `pending` - Pending verification store
    /// * `confirmed` - Confirmed email store
    /// * `config` - Service configuration
    pub fn new(pending: Arc<P>, confirmed: Arc<C>, config: VerificationServiceConfig) -> Self {
        Self::with_clock(pending, confirmed, Arc::new(SystemClock), config)
    }

    /// Create a new verification service with an explicit clock
    ///
    /// Out-of-range lifetimes and secret sizes are clamped, not rejected.
    pub fn with_clock(
        pending: Arc<P>,
        confirmed: Arc<C>,
        clock: Arc<dyn Clock>,
        mut config: VerificationServiceConfig,
    ) -> Self {
        let ttl_minutes = clamp_token_ttl_minutes(config.token_ttl_minutes);
        if ttl_minutes != config.token_ttl_minutes {
            tracing::warn!(
                configured = config.token_ttl_minutes,
                applied = ttl_minutes,
                "Token lifetime out of range; clamped"
            );
            config.token_ttl_minutes = ttl_minutes;
        }

        let codec = TokenCodec::new(config.secret_bytes);
        if codec.secret_bytes() != config.secret_bytes {
            tracing::warn!(
                configured = config.secret_bytes,
                applied = codec.secret_bytes(),
                "Secret size out of range; clamped"
            );
            config.secret_bytes = codec.secret_bytes();
        }

        Self {
            pending,
            confirmed,
            clock,
            codec,
            config,
        }
    }

    /// Token lifetime
    pub fn token_ttl(&self) -> Duration {
        Duration::try_minutes(self.config.token_ttl_minutes)
            .unwrap_or_else(|| Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
    }

    /// Issue a verification token for an address
    ///
    /// This method:
    /// 1. Normalizes the address (trim, lowercase) and checks its shape
    /// 2. Generates a fresh secret and its fingerprint
    /// 3. Stores a pending record holding only the fingerprint
    /// 4. Returns the raw secret to the caller for delivery
    ///
    /// Earlier tokens for the same address stay valid until they expire or
    /// are redeemed.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationRequestResult)` - Secret, normalized email and expiry
    /// * `Err(DomainError::Validation)` - Malformed address
    /// * `Err(DomainError::StorageUnavailable)` - Store could not be written
    pub async fn request_verification(&self, email: &str) -> DomainResult<VerificationRequestResult> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: "Invalid email address format".to_string(),
            });
        }

        let token = self.codec.generate();
        let now = self.clock.now();

        let record = self
            .pending
            .create(&email, &token.fingerprint, self.token_ttl(), now)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&email),
                    error = %e,
                    event = "verification_store_failed",
                    "Failed to store pending verification"
                );
                e
            })?;

        tracing::info!(
            email = %mask_email(&email),
            record_id = %record.id,
            expires_at = %record.expires_at,
            event = "verification_requested",
            "Issued verification token"
        );

        Ok(VerificationRequestResult {
            secret: token.secret,
            email: record.email,
            expires_at: record.expires_at,
        })
    }

    /// Redeem a secret and confirm the address it was issued for
    ///
    /// The secret is fingerprinted exactly as presented. The pending record
    /// is consumed atomically, so a secret succeeds at most once. Wrong, expired and already-used secrets all yield
    /// `InvalidOrExpired`.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfirmedEmail)` - The address is now confirmed
    /// * `Err(DomainError::Verification)` - Invalid, expired or used secret
    /// * `Err(DomainError::StorageUnavailable)` - Store could not be reached
    pub async fn redeem(&self, secret: &str) -> DomainResult<ConfirmedEmail> {
        if secret.is_empty() || secret.len() > MAX_SECRET_LENGTH {
            tracing::warn!(
                event = "verification_rejected",
                reason = "malformed",
                "Rejected malformed verification token"
            );
            return Err(VerificationError::InvalidOrExpired.into());
        }

        let fingerprint = TokenCodec::fingerprint_of(secret);
        let now = self.clock.now();

        let record = match self.pending.consume(&fingerprint, now).await? {
            Some(record) => record,
            None => {
                tracing::warn!(
                    event = "verification_rejected",
                    reason = "no_live_record",
                    "Verification token is invalid or expired"
                );
                return Err(VerificationError::InvalidOrExpired.into());
            }
        };

        // The pending record is already gone; the user has to request again
        // if this write fails
        let confirmed = self
            .confirmed
            .record(&record.email, now)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(&record.email),
                    record_id = %record.id,
                    error = %e,
                    event = "confirmation_store_failed",
                    "Token consumed but confirmation could not be recorded"
                );
                e
            })?;

        tracing::info!(
            email = %mask_email(&confirmed.email),
            record_id = %record.id,
            event = "verification_redeemed",
            "Email address confirmed"
        );

        Ok(confirmed)
    }

    /// Check if an address has been confirmed
    pub async fn is_confirmed(&self, email: &str) -> DomainResult<bool> {
        let email = normalize_email(email);
        self.confirmed.is_confirmed(&email).await
    }
}
