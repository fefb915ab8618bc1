//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the EarlyAccess
//! backend, following Clean Architecture principles. It provides concrete
//! implementations of the core repository and mailer traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL pending/confirmed stores using SQLx
//! - **Cache**: Redis client and the Redis-backed stores
//! - **Mailer**: Logging mail transport
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis support (default)

use ea_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and stores
pub mod cache;

/// Mail delivery implementations
pub mod mailer;

/// Configuration module for infrastructure services
pub mod config {
    //! Re-exports of the shared connection settings
    pub use ea_shared::config::{CacheConfig, DatabaseConfig};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Stored payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Mail delivery error: {0}")]
    Mail(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(_) | InfrastructureError::Cache(_) => {
                DomainError::StorageUnavailable {
                    message: err.to_string(),
                }
            }
            InfrastructureError::Serialization(_)
            | InfrastructureError::Config(_)
            | InfrastructureError::Mail(_) => DomainError::Internal {
                message: err.to_string(),
            },
        }
    }
}
