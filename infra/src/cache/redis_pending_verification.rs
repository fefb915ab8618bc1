//! Redis implementation of PendingVerificationRepository
//!
//! Key layout:
//! - `verification:pending:{fingerprint}` - JSON record, `PX` set to the
//!   remaining lifetime
//!
//! Consumption uses `GETDEL`, so exactly one caller receives the payload.
//! Redis expires keys on its own, which leaves the sweep with nothing to do.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use ea_core::domain::entities::PendingVerification;
use ea_core::errors::DomainError;
use ea_core::repositories::PendingVerificationRepository;

use crate::cache::RedisClient;
use crate::InfrastructureError;

const PENDING_KEY_PREFIX: &str = "verification:pending";

/// Redis-backed pending verification store
#[derive(Clone)]
pub struct RedisPendingVerificationRepository {
    redis_client: RedisClient,
}

impl RedisPendingVerificationRepository {
    pub fn new(redis_client: RedisClient) -> Self {
        Self { redis_client }
    }

    fn pending_key(&self, token_fingerprint: &str) -> String {
        self.redis_client
            .make_key(&format!("{}:{}", PENDING_KEY_PREFIX, token_fingerprint))
    }

    fn decode(payload: &str) -> Result<PendingVerification, DomainError> {
        serde_json::from_str(payload)
            .map_err(|e| DomainError::from(InfrastructureError::Serialization(e)))
    }
}

#[async_trait]
impl PendingVerificationRepository for RedisPendingVerificationRepository {
    async fn create(
        &self,
        email: &str,
        token_fingerprint: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<PendingVerification, DomainError> {
        let record = PendingVerification::new(email, token_fingerprint, now, ttl);

        let expiry_ms = ttl.num_milliseconds();
        if expiry_ms <= 0 {
            // Dead on arrival; nothing could ever redeem it
            return Ok(record);
        }

        let payload = serde_json::to_string(&record).map_err(InfrastructureError::Serialization)?;
        let written = self
            .redis_client
            .set_nx_with_expiry_ms(&self.pending_key(token_fingerprint), &payload, expiry_ms as u64)
            .await?;

        if !written {
            return Err(DomainError::Internal {
                message: "Token fingerprint collision".to_string(),
            });
        }

        Ok(record)
    }

    async fn consume(
        &self,
        token_fingerprint: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<PendingVerification>, DomainError> {
        let payload = match self
            .redis_client
            .get_del(&self.pending_key(token_fingerprint))
            .await?
        {
            Some(payload) => payload,
            None => return Ok(None),
        };

        let record = Self::decode(&payload)?;

        // Redis and the application clock may disagree by a few milliseconds
        if record.is_live_at(now) {
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        debug!("Redis expires pending verifications natively; nothing to sweep");
        Ok(0)
    }

    async fn count_live_for_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let pattern = self
            .redis_client
            .make_key(&format!("{}:*", PENDING_KEY_PREFIX));
        let keys = self.redis_client.scan_keys(&pattern).await?;

        let mut count = 0;
        for key in keys {
            // Keys can expire between the scan and the read
            if let Some(payload) = self.redis_client.get(&key).await? {
                let record = Self::decode(&payload)?;
                if record.email == email && record.is_live_at(now) {
                    count += 1;
                }
            }
        }

        Ok(count)
    }
}
