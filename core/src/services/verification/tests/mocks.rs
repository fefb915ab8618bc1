//! Mock implementations for testing verification service

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::entities::{ConfirmedEmail, PendingVerification};
use crate::errors::DomainError;
use crate::repositories::{ConfirmedEmailRepository, PendingVerificationRepository};

fn unavailable() -> DomainError {
    DomainError::StorageUnavailable {
        message: "connection refused".to_string(),
    }
}

// Pending store whose backend is down
#[derive(Default)]
pub struct UnavailablePendingRepository {
    pub calls: AtomicUsize,
}

impl UnavailablePendingRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PendingVerificationRepository for UnavailablePendingRepository {
    async fn create(
        &self,
        _email: &str,
        _token_fingerprint: &str,
        _ttl: Duration,
        _now: DateTime<Utc>,
    ) -> Result<PendingVerification, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(unavailable())
    }

    async fn consume(
        &self,
        _token_fingerprint: &str,
        _now: DateTime<Utc>,
    ) -> Result<Option<PendingVerification>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(unavailable())
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(unavailable())
    }

    async fn count_live_for_email(
        &self,
        _email: &str,
        _now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(unavailable())
    }
}

// Confirmed store that rejects every write
pub struct UnavailableConfirmedRepository;

#[async_trait]
impl ConfirmedEmailRepository for UnavailableConfirmedRepository {
    async fn record(
        &self,
        _email: &str,
        _confirmed_at: DateTime<Utc>,
    ) -> Result<ConfirmedEmail, DomainError> {
        Err(unavailable())
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<ConfirmedEmail>, DomainError> {
        Err(unavailable())
    }
}
