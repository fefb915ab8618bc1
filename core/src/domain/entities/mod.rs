//! Domain entities representing core business objects.

pub mod confirmed_email;
pub mod pending_verification;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use confirmed_email::ConfirmedEmail;
pub use pending_verification::PendingVerification;
