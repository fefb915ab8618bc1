//! Redis implementation of ConfirmedEmailRepository
//!
//! Key layout:
//! - `verification:confirmed:{email}` - JSON row, no expiry

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use ea_core::domain::entities::ConfirmedEmail;
use ea_core::errors::DomainError;
use ea_core::repositories::ConfirmedEmailRepository;

use crate::cache::RedisClient;
use crate::InfrastructureError;

const CONFIRMED_KEY_PREFIX: &str = "verification:confirmed";

/// Redis-backed confirmed email store
#[derive(Clone)]
pub struct RedisConfirmedEmailRepository {
    redis_client: RedisClient,
}

impl RedisConfirmedEmailRepository {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    fn confirmed_key(&self, email: &str) -> String {
        self.redis_client
            .make_key(&format!("{}:{}", CONFIRMED_KEY_PREFIX, email))
    }
}

#[async_trait]
impl ConfirmedEmailRepository for RedisConfirmedEmailRepository {
    async fn record(
        &self,
        email: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Result<ConfirmedEmail, DomainError> {
        let candidate = ConfirmedEmail::new(email, confirmed_at);
        let payload =
            serde_json::to_string(&candidate).map_err(InfrastructureError::Serialization)?;

        if self.redis_client.set_nx(&self.confirmed_key(email), &payload).await? {
            return Ok(candidate);
        }

        self.find_by_email(email).await?.ok_or_else(|| DomainError::Internal {
            message: "Confirmed email missing after insert".to_string(),
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ConfirmedEmail>, DomainError> {
        match self.redis_client.get(&self.confirmed_key(email)).await? {
            Some(payload) => serde_json::from_str(&payload)
                .map(Some)
                .map_err(|e| InfrastructureError::Serialization(e).into()),
            None => Ok(None),
        }
    }
}
