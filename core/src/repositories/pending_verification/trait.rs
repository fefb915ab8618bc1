//! Pending verification repository trait defining custody of in-flight tokens.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::PendingVerification;
use crate::errors::DomainError;

/// Repository trait for PendingVerification persistence operations
///
/// Implementations hold one record per in-flight verification attempt and
/// must make [`consume`](PendingVerificationRepository::consume) a single
/// atomic find-and-delete.
///
/// # Security Considerations
/// - Only token fingerprints are stored, never the raw secret
/// - `consume` must admit exactly one winner per fingerprint under concurrency
/// - Backend outages surface as `DomainError::StorageUnavailable`
#[async_trait]
pub trait PendingVerificationRepository: Send + Sync {
    /// Insert a new pending record expiring at `now + ttl`
    ///
    /// There is no uniqueness constraint on email: a new request does not
    /// supersede earlier ones, which simply expire or are redeemed on their own.
    ///
    /// # Arguments
    /// * `email` - Normalized claimed address
    /// * `token_fingerprint` - Fingerprint of the issued secret
    /// * `ttl` - Token lifetime
    /// * `now` - Issue time
    ///
    /// # Returns
    /// * `Ok(PendingVerification)` - The stored record
    /// * `Err(DomainError)` - Storage failure
    async fn create(
        &self,
        email: &str,
        token_fingerprint: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<PendingVerification, DomainError>;

    /// Atomically locate the live record with this fingerprint and delete it
    ///
    /// A record is live when `expires_at > now`. When several callers present
    /// the same fingerprint concurrently, exactly one receives the record and
    /// every other caller receives `None`.
    ///
    /// # Arguments
    /// * `token_fingerprint` - Fingerprint of the presented secret
    /// * `now` - Redemption time
    ///
    /// # Returns
    /// * `Ok(Some(PendingVerification))` - This caller consumed the record
    /// * `Ok(None)` - No live record matched (wrong, expired or already used)
    /// * `Err(DomainError)` - Storage failure
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use ea_core::repositories::PendingVerificationRepository;
    /// # async fn example(repo: &impl PendingVerificationRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.consume("9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08", Utc::now()).await? {
    ///     Some(record) => println!("Verified {}", record.email),
    ///     None => println!("Link is invalid or has expired"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn consume(
        &self,
        token_fingerprint: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<PendingVerification>, DomainError>;

    /// Delete every record with `expires_at <= now`
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of expired records deleted
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Count live records issued for an address
    async fn count_live_for_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError>;
}
