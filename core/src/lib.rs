//! # EarlyAccess Core
//!
//! Core business logic and domain layer for the EarlyAccess backend.
//! This crate contains the email verification token lifecycle: domain
//! entities, the token codec, repository interfaces, the verification
//! service, and the error types that form the foundation of the application.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{ConfirmedEmail, PendingVerification};
pub use errors::{DomainError, DomainResult, VerificationError};
pub use repositories::{ConfirmedEmailRepository, PendingVerificationRepository};
pub use services::*;
