//! Confirmed email repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::ConfirmedEmail;
use crate::errors::DomainError;

/// Repository trait for ConfirmedEmail persistence operations
///
/// Rows are written only as the side effect of a successful redemption.
/// Recording an address that is already confirmed keeps the original row.
#[async_trait]
pub trait ConfirmedEmailRepository: Send + Sync {
    /// Record an address as confirmed
    ///
    /// # Returns
    /// * `Ok(ConfirmedEmail)` - The stored row (the earlier one if it existed)
    /// * `Err(DomainError)` - Storage failure
    async fn record(
        &self,
        email: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Result<ConfirmedEmail, DomainError>;

    /// Find the confirmation row for an address
    async fn find_by_email(&self, email: &str) -> Result<Option<ConfirmedEmail>, DomainError>;

    /// Check if an address has been confirmed
    async fn is_confirmed(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
