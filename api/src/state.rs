//! Shared application state

use std::sync::Arc;

use ea_core::repositories::{ConfirmedEmailRepository, PendingVerificationRepository};
use ea_core::services::{MailerTrait, VerificationService};
use ea_shared::VerificationConfig;

/// Application state that holds shared services
pub struct AppState<P, C>
where
    P: PendingVerificationRepository,
    C: ConfirmedEmailRepository,
{
    pub verification_service: Arc<VerificationService<P, C>>,
    pub mailer: Arc<dyn MailerTrait>,
    /// Link construction and token lifetime
    pub verification_config: VerificationConfig,
}

impl<P, C> AppState<P, C>
where
    P: PendingVerificationRepository,
    C: ConfirmedEmailRepository,
{
    pub fn new(
        verification_service: Arc<VerificationService<P, C>>,
        mailer: Arc<dyn MailerTrait>,
        verification_config: VerificationConfig,
    ) -> Self {
        Self {
            verification_service,
            mailer,
            verification_config,
        }
    }
}
