//! In-memory implementation of ConfirmedEmailRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::ConfirmedEmail;
use crate::errors::DomainError;

use super::r#trait::ConfirmedEmailRepository;

/// Confirmed email store keyed by address
#[derive(Clone, Default)]
pub struct InMemoryConfirmedEmailRepository {
    emails: Arc<RwLock<HashMap<String, ConfirmedEmail>>>,
}

impl InMemoryConfirmedEmailRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of confirmed addresses
    pub async fn len(&self) -> usize {
        self.emails.read().await.len()
    }
}

#[async_trait]
impl ConfirmedEmailRepository for InMemoryConfirmedEmailRepository {
    async fn record(
        &self,
        email: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Result<ConfirmedEmail, DomainError> {
        let mut emails = self.emails.write().await;
        let row = emails
            .entry(email.to_string())
            .or_insert_with(|| ConfirmedEmail::new(email, confirmed_at));
        Ok(row.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ConfirmedEmail>, DomainError> {
        let emails = self.emails.read().await;
        Ok(emails.get(email).cloned())
    }
}
