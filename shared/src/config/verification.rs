//! Email verification configuration module

use serde::{Deserialize, Serialize};

/// Default lifetime of a verification token (30 minutes)
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Shortest accepted token lifetime
pub const MIN_TOKEN_TTL_MINUTES: i64 = 1;

/// Longest accepted token lifetime (7 days)
pub const MAX_TOKEN_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Default number of random bytes in a verification secret (256 bits)
pub const DEFAULT_SECRET_BYTES: usize = 32;

/// Bring a configured lifetime into the accepted range
pub fn clamp_token_ttl_minutes(minutes: i64) -> i64 {
    minutes.clamp(MIN_TOKEN_TTL_MINUTES, MAX_TOKEN_TTL_MINUTES)
}

/// Backend holding pending verification records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local map, lost on restart
    #[default]
    Memory,
    /// MySQL tables `pending_verifications` / `confirmed_emails`
    Mysql,
    /// Redis keys with native expiry
    Redis,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            "mysql" => Ok(StorageBackend::Mysql),
            "redis" => Ok(StorageBackend::Redis),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Verification token lifecycle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes a token stays redeemable
    pub token_ttl_minutes: i64,

    /// Random bytes drawn per secret
    pub secret_bytes: usize,

    /// Public base URL the verification link is built on
    pub public_base_url: String,

    /// Where pending records live
    #[serde(default)]
    pub storage: StorageBackend,

    /// Seconds between expired-record sweeps
    pub cleanup_interval_seconds: u64,

    /// Whether the sweep task runs at all
    pub cleanup_enabled: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            secret_bytes: DEFAULT_SECRET_BYTES,
            public_base_url: String::from("http://localhost:8080/api/v1"),
            storage: StorageBackend::default(),
            cleanup_interval_seconds: 300,
            cleanup_enabled: true,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            token_ttl_minutes: std::env::var("VERIFICATION_TOKEN_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(clamp_token_ttl_minutes)
                .unwrap_or(defaults.token_ttl_minutes),
            secret_bytes: std::env::var("VERIFICATION_SECRET_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.secret_bytes),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or(defaults.public_base_url),
            storage: std::env::var("VERIFICATION_STORAGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.storage),
            cleanup_interval_seconds: std::env::var("VERIFICATION_CLEANUP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval_seconds),
            cleanup_enabled: std::env::var("VERIFICATION_CLEANUP_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_enabled),
        }
    }

    /// Token lifetime in seconds
    pub fn token_ttl_seconds(&self) -> i64 {
        clamp_token_ttl_minutes(self.token_ttl_minutes) * 60
    }

    /// Build the link embedded in the outbound message
    pub fn verification_link(&self, secret: &str) -> String {
        format!("{}/verify/{}", self.public_base_url.trim_end_matches('/'), secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VerificationConfig::default();
        assert_eq!(config.token_ttl_minutes, 30);
        assert_eq!(config.token_ttl_seconds(), 1800);
        assert_eq!(config.secret_bytes, 32);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(
            config.verification_link("abc"),
            "http://localhost:8080/api/v1/verify/abc"
        );
    }

    #[test]
    fn test_token_ttl_is_clamped() {
        assert_eq!(clamp_token_ttl_minutes(0), MIN_TOKEN_TTL_MINUTES);
        assert_eq!(clamp_token_ttl_minutes(-15), MIN_TOKEN_TTL_MINUTES);
        assert_eq!(clamp_token_ttl_minutes(45), 45);
        assert_eq!(clamp_token_ttl_minutes(i64::MAX / 1000), MAX_TOKEN_TTL_MINUTES);

        let config = VerificationConfig {
            token_ttl_minutes: i64::MAX,
            ..Default::default()
        };
        assert_eq!(config.token_ttl_seconds(), MAX_TOKEN_TTL_MINUTES * 60);
    }

    #[test]
    fn test_verification_link_strips_trailing_slash() {
        let config = VerificationConfig {
            public_base_url: "https://early.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.verification_link("abc123"),
            "https://early.example.com/verify/abc123"
        );
    }

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!("MySQL".parse::<StorageBackend>().unwrap(), StorageBackend::Mysql);
        assert_eq!("redis".parse::<StorageBackend>().unwrap(), StorageBackend::Redis);
        assert_eq!("in-memory".parse::<StorageBackend>().unwrap(), StorageBackend::Memory);
        assert!("mongo".parse::<StorageBackend>().is_err());
    }
}
