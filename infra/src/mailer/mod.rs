//! Mail delivery implementations
//!
//! Only a logging transport lives here; real providers plug in through
//! `ea_core::services::MailerTrait`.

mod log_mailer;

pub use log_mailer::LogMailer;
