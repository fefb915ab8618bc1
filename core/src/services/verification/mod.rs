//! Verification service module for email-based signup
//!
//! This module provides the verification token lifecycle:
//! - Issuing a one-time secret bound to a claimed address
//! - Redeeming that secret exactly once before it expires
//! - Sweeping expired pending records in the background

mod cleanup;
mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, VerificationCleanupConfig, VerificationCleanupService};
pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::{MailerTrait, OutboundEmail};
pub use types::VerificationRequestResult;
