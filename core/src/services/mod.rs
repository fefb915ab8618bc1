//! Business services containing domain logic and use cases.

pub mod clock;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use token::{GeneratedToken, TokenCodec};
pub use verification::{
    CleanupResult, MailerTrait, OutboundEmail, VerificationCleanupConfig,
    VerificationCleanupService, VerificationRequestResult, VerificationService,
    VerificationServiceConfig,
};
