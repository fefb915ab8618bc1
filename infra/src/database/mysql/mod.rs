//! MySQL repository implementations

mod confirmed_email_repository_impl;
mod pending_verification_repository_impl;

pub use confirmed_email_repository_impl::MySqlConfirmedEmailRepository;
pub use pending_verification_repository_impl::MySqlPendingVerificationRepository;
