//! In-memory implementation of PendingVerificationRepository
//!
//! Used for development, tests, and single-process deployments. Records do
//! not survive a restart.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::PendingVerification;
use crate::errors::DomainError;

use super::r#trait::PendingVerificationRepository;

/// Pending verification store keyed by token fingerprint
#[derive(Clone, Default)]
pub struct InMemoryPendingVerificationRepository {
    records: Arc<RwLock<HashMap<String, PendingVerification>>>,
}

impl InMemoryPendingVerificationRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Total stored records, live or expired
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records at all
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PendingVerificationRepository for InMemoryPendingVerificationRepository {
    async fn create(
        &self,
        email: &str,
        token_fingerprint: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<PendingVerification, DomainError> {
        let record = PendingVerification::new(email, token_fingerprint, now, ttl);
        let mut records = self.records.write().await;

        if records.contains_key(token_fingerprint) {
            return Err(DomainError::Internal {
                message: "Token fingerprint collision".to_string(),
            });
        }

        records.insert(record.token_fingerprint.clone(), record.clone());
        Ok(record)
    }

    async fn consume(
        &self,
        token_fingerprint: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<PendingVerification>, DomainError> {
        // Check and removal happen under one write guard
        let mut records = self.records.write().await;

        match records.get(token_fingerprint) {
            Some(record) if record.is_live_at(now) => Ok(records.remove(token_fingerprint)),
            _ => Ok(None),
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, record| record.is_live_at(now));

        Ok(initial_count - records.len())
    }

    async fn count_live_for_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.email == email && r.is_live_at(now))
            .count())
    }
}
