//! Logging mailer
//!
//! Stands in for a mail provider during development and testing. Messages
//! are recorded through `tracing` with the recipient masked and the body
//! omitted, since the body carries the verification link.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use ea_core::services::{MailerTrait, OutboundEmail};
use ea_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// Mailer that logs instead of delivering
#[derive(Clone, Default)]
pub struct LogMailer {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print the full message to stdout (local development only)
    console_output: bool,
}

impl LogMailer {
    /// Create a new logging mailer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mailer with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Log a message, returning a generated message id
    pub async fn deliver(&self, message: &OutboundEmail) -> Result<String, InfrastructureError> {
        let masked = mask_email(&message.recipient);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(recipient = %masked, "Log mailer simulating failure");
            return Err(InfrastructureError::Mail(
                "Simulated mail delivery failure".to_string(),
            ));
        }

        let message_id = format!("log_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("LOG MAILER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", message.recipient);
            println!("Subject: {}", message.subject);
            println!("Message ID: {}", message_id);
            println!("{}", message.body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mail_service",
            provider = "log",
            recipient = %masked,
            subject = %message.subject,
            message_id = %message_id,
            body_length = message.body.len(),
            "Email sent (log)"
        );

        Ok(message_id)
    }
}

#[async_trait]
impl MailerTrait for LogMailer {
    async fn send(&self, message: &OutboundEmail) -> Result<String, String> {
        self.deliver(message).await.map_err(|e| e.to_string())
    }
}
