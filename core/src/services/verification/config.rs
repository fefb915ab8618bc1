//! Configuration for the verification service

use ea_shared::config::verification::{
    clamp_token_ttl_minutes, DEFAULT_SECRET_BYTES, DEFAULT_TOKEN_TTL_MINUTES,
};
use ea_shared::VerificationConfig;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a token expires; the service clamps it to
    /// `MIN_TOKEN_TTL_MINUTES..=MAX_TOKEN_TTL_MINUTES`
    pub token_ttl_minutes: i64,
    /// Random bytes drawn for each secret
    pub secret_bytes: usize,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            secret_bytes: DEFAULT_SECRET_BYTES,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            token_ttl_minutes: clamp_token_ttl_minutes(config.token_ttl_minutes),
            secret_bytes: config.secret_bytes,
        }
    }
}
