pub mod confirmed_email;
pub mod pending_verification;

pub use confirmed_email::{ConfirmedEmailRepository, InMemoryConfirmedEmailRepository};
pub use pending_verification::{InMemoryPendingVerificationRepository, PendingVerificationRepository};
