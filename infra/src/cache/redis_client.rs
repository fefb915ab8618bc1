//! Redis client implementation
//!
//! This module provides a Redis client with a multiplexed connection, retry
//! logic, and the handful of commands the verification stores need: set with
//! expiry (only if absent), get, atomic get-and-delete, and key scans.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::config::CacheConfig;
use crate::InfrastructureError;

/// Redis client with retry logic
///
/// Cloning is cheap; clones share the multiplexed connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    /// Configuration used to create this client
    config: CacheConfig,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Example
    /// ```no_run
    /// use ea_infra::cache::{CacheConfig, RedisClient};
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let config = CacheConfig::new("redis://localhost:6379").with_prefix("earlyaccess");
    ///     let client = RedisClient::new(config).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!(error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, config.max_retries, config.retry_delay_ms)
                .await?;

        info!("Redis client created successfully");

        Ok(Self { connection, config })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_retries => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_retries, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Apply the configured key prefix
    pub fn make_key(&self, key: &str) -> String {
        self.config.make_key(key)
    }

    /// Set `key` to `value` with a millisecond expiry, only if it is absent
    ///
    /// Sent once: a replay after a lost reply would see its own write and
    /// report the key as taken.
    ///
    /// # Returns
    /// * `Ok(true)` - The key was written
    /// * `Ok(false)` - The key already existed and was left untouched
    pub async fn set_nx_with_expiry_ms(
        &self,
        key: &str,
        value: &str,
        expiry_ms: u64,
    ) -> Result<bool, InfrastructureError> {
        debug!("Setting key '{}' with expiry {}ms (NX)", key, expiry_ms);

        let reply = self
            .execute_with_retry(Replay::Once, |mut conn| {
                let key = key.to_string();
                let value = value.to_string();

                Box::pin(async move {
                    redis::cmd("SET")
                        .arg(key)
                        .arg(value)
                        .arg("PX")
                        .arg(expiry_ms)
                        .arg("NX")
                        .query_async::<_, Option<String>>(&mut conn)
                        .await
                })
            })
            .await
            .map_err(|e| {
                error!("Failed to set key '{}': {}", key, e);
                InfrastructureError::Cache(e)
            })?;

        Ok(reply.is_some())
    }

    /// Set `key` to `value` without expiry, only if it is absent
    pub async fn set_nx(&self, key: &str, value: &str) -> Result<bool, InfrastructureError> {
        debug!("Setting key '{}' (NX)", key);

        self.execute_with_retry(Replay::Safe, |mut conn| {
            let key = key.to_string();
            let value = value.to_string();

            Box::pin(async move { conn.set_nx::<_, _, bool>(key, value).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to set key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Get a value
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", key);

        self.execute_with_retry(Replay::Safe, |mut conn| {
            let key = key.to_string();

            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(|e| {
            error!("Failed to get key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Atomically read and remove a key (`GETDEL`)
    ///
    /// Of several concurrent callers, at most one observes the value. Sent
    /// once: a replay after a lost reply would find the key already gone.
    pub async fn get_del(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Get-and-delete key '{}'", key);

        self.execute_with_retry(Replay::Once, |mut conn| {
            let key = key.to_string();

            Box::pin(async move {
                redis::cmd("GETDEL")
                    .arg(key)
                    .query_async::<_, Option<String>>(&mut conn)
                    .await
            })
        })
        .await
        .map_err(|e| {
            error!("Failed to get-and-delete key '{}': {}", key, e);
            InfrastructureError::Cache(e)
        })
    }

    /// Collect every key matching a glob pattern using `SCAN`
    pub async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, InfrastructureError> {
        debug!("Scanning keys matching '{}'", pattern);

        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, batch) = self
                .execute_with_retry(Replay::Safe, |mut conn| {
                    let pattern = pattern.to_string();

                    Box::pin(async move {
                        redis::cmd("SCAN")
                            .arg(cursor)
                            .arg("MATCH")
                            .arg(pattern)
                            .arg("COUNT")
                            .arg(100)
                            .query_async::<_, (u64, Vec<String>)>(&mut conn)
                            .await
                    })
                })
                .await
                .map_err(InfrastructureError::Cache)?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys)
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        debug!("Performing Redis health check");

        let result = self
            .execute_with_retry(Replay::Safe, |mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async::<_, String>(&mut conn).await })
            })
            .await;

        match result {
            Ok(response) if response == "PONG" => {
                debug!("Redis health check passed");
                Ok(true)
            }
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }

    /// Execute a Redis operation with automatic retry logic
    ///
    /// Retries transient failures with exponential backoff, up to the limit
    /// [`attempt_limit`] allows for `replay`.
    async fn execute_with_retry<F, T>(&self, replay: Replay, operation: F) -> RedisResult<T>
    where
        F: Fn(
            MultiplexedConnection,
        ) -> std::pin::Pin<Box<dyn std::future::Future<Output = RedisResult<T>> + Send>>,
    {
        let max_attempts = attempt_limit(replay, self.config.max_retries);
        let mut attempts = 0;
        let mut delay = self.config.retry_delay_ms;

        loop {
            attempts += 1;
            let conn = self.connection.clone();

            match operation(conn).await {
                Ok(result) => return Ok(result),
                Err(e) if attempts < max_attempts && is_retriable_error(&e) => {
                    warn!(
                        "Redis operation failed (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(5000);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether a command may be sent again when its outcome is unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Replay {
    /// Re-sending leaves the same state and reply
    Safe,
    /// The first execution changes what a second one would see
    Once,
}

/// Attempts allowed for a command
pub(crate) fn attempt_limit(replay: Replay, max_retries: u32) -> u32 {
    match replay {
        Replay::Safe => max_retries.max(1),
        Replay::Once => 1,
    }
}

/// Check if a Redis error is transient and worth retrying
pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a connection URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
