//! Traits for mail delivery integration

use async_trait::async_trait;

/// A message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Trait for mail transport integration
///
/// The verification service never calls this; the caller composes the link
/// from the issued secret and hands it over for delivery.
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Deliver a message, returning the provider message id
    async fn send(&self, message: &OutboundEmail) -> Result<String, String>;
}
