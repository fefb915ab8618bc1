//! Shared utilities and common types for the EarlyAccess server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error types and response structures
//! - Utility functions (email normalisation and masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    ServerConfig, StorageBackend, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, DetailedResponse, ErrorDetail, ResponseMeta, ResponseStatus};
pub use utils::email;
