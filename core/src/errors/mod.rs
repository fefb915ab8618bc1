//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{VerificationError, INVALID_OR_EXPIRED_MESSAGE};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Whether the caller may retry the same request later
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::StorageUnavailable { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
