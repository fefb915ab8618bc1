//! MySQL implementation of the PendingVerificationRepository trait.
//!
//! Records live in `pending_verifications`, keyed by the unique token
//! fingerprint. Consumption is a conditional delete: of several callers
//! presenting the same fingerprint, only the one whose `DELETE` affects a row
//! wins.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ea_core::domain::entities::PendingVerification;
use ea_core::errors::DomainError;
use ea_core::repositories::PendingVerificationRepository;

use crate::InfrastructureError;

/// MySQL implementation of PendingVerificationRepository
pub struct MySqlPendingVerificationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlPendingVerificationRepository {
    /// Create a new MySQL pending verification repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to PendingVerification entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<PendingVerification, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        Ok(PendingVerification {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid record UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            token_fingerprint: row.try_get("token_fingerprint").map_err(|e| {
                DomainError::Internal {
                    message: format!("Failed to get token_fingerprint: {}", e),
                }
            })?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(|e| {
                DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                }
            })?,
            expires_at: row.try_get::<DateTime<Utc>, _>("expires_at").map_err(|e| {
                DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                }
            })?,
        })
    }
}

fn storage_error(e: sqlx::Error) -> DomainError {
    InfrastructureError::Database(e).into()
}

#[async_trait]
impl PendingVerificationRepository for MySqlPendingVerificationRepository {
    async fn create(
        &self,
        email: &str,
        token_fingerprint: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<PendingVerification, DomainError> {
        let record = PendingVerification::new(email, token_fingerprint, now, ttl);

        let query = r#"
            INSERT INTO pending_verifications (
                id, email, token_fingerprint, created_at, expires_at
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.email)
            .bind(&record.token_fingerprint)
            .bind(record.created_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let collision = e
                    .as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false);
                if collision {
                    DomainError::Internal {
                        message: "Token fingerprint collision".to_string(),
                    }
                } else {
                    storage_error(e)
                }
            })?;

        Ok(record)
    }

    async fn consume(
        &self,
        token_fingerprint: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<PendingVerification>, DomainError> {
        // The conditional delete below decides the winner
        let select = r#"
            SELECT id, email, token_fingerprint, created_at, expires_at
            FROM pending_verifications
            WHERE token_fingerprint = ? AND expires_at > ?
            LIMIT 1
        "#;

        let row = sqlx::query(select)
            .bind(token_fingerprint)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        let record = match row {
            Some(row) => Self::row_to_record(&row)?,
            None => return Ok(None),
        };

        let delete = r#"
            DELETE FROM pending_verifications
            WHERE token_fingerprint = ? AND expires_at > ?
        "#;

        let result = sqlx::query(delete)
            .bind(token_fingerprint)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 1 {
            Ok(Some(record))
        } else {
            tracing::debug!(
                record_id = %record.id,
                "Pending verification consumed by a concurrent caller"
            );
            Ok(None)
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let query = "DELETE FROM pending_verifications WHERE expires_at <= ?";

        let result = sqlx::query(query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() as usize)
    }

    async fn count_live_for_email(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let query = r#"
            SELECT COUNT(*) as count
            FROM pending_verifications
            WHERE email = ? AND expires_at > ?
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let count: i64 = row.try_get("count").map_err(|e| DomainError::Internal {
            message: format!("Failed to get count: {}", e),
        })?;

        Ok(count as usize)
    }
}
