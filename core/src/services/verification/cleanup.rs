//! Cleanup service for periodic removal of expired pending verifications

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::PendingVerificationRepository;
use crate::services::clock::Clock;

/// Configuration for the cleanup service
#[derive(Debug, Clone)]
pub struct VerificationCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for VerificationCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 300,
            enabled: true,
        }
    }
}

impl From<&ea_shared::VerificationConfig> for VerificationCleanupConfig {
    fn from(config: &ea_shared::VerificationConfig) -> Self {
        Self {
            interval_seconds: config.cleanup_interval_seconds,
            enabled: config.cleanup_enabled,
        }
    }
}

/// Summary of one cleanup cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    pub expired_deleted: usize,
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Service that deletes expired pending verifications
pub struct VerificationCleanupService<P: PendingVerificationRepository + 'static> {
    repository: Arc<P>,
    clock: Arc<dyn Clock>,
    config: VerificationCleanupConfig,
}

impl<P: PendingVerificationRepository> VerificationCleanupService<P> {
    pub fn new(repository: Arc<P>, clock: Arc<dyn Clock>, config: VerificationCleanupConfig) -> Self {
        Self {
            repository,
            clock,
            config,
        }
    }

    /// Run a single cleanup cycle
    ///
    /// Failures are collected into the result rather than returned, so the
    /// background loop keeps going.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let mut result = CleanupResult::default();

        match self.repository.delete_expired(self.clock.now()).await {
            Ok(count) => {
                result.expired_deleted = count;
                info!(
                    deleted = count,
                    event = "verification_cleanup",
                    "Deleted expired pending verifications"
                );
            }
            Err(e) => {
                error!(
                    error = %e,
                    event = "verification_cleanup_failed",
                    "Failed to delete expired pending verifications"
                );
                result.errors.push(format!("Pending verification cleanup error: {}", e));
            }
        }

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs cleanup at the configured interval.
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.enabled {
            info!("Verification cleanup is disabled");
            return None;
        }

        let interval_seconds = self.config.interval_seconds.max(1);
        info!(interval_seconds, "Starting verification cleanup task");

        Some(tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(interval_seconds));

            loop {
                interval.tick().await;
                match self.run_cleanup().await {
                    Ok(result) if !result.is_success() => {
                        warn!(errors = ?result.errors, "Cleanup completed with errors");
                    }
                    Ok(_) => {}
                    Err(e) => error!(error = %e, "Verification cleanup cycle failed"),
                }
            }
        }))
    }
}
