//! MySQL implementation of the ConfirmedEmailRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ea_core::domain::entities::ConfirmedEmail;
use ea_core::errors::DomainError;
use ea_core::repositories::ConfirmedEmailRepository;

use crate::InfrastructureError;

/// MySQL implementation of ConfirmedEmailRepository
pub struct MySqlConfirmedEmailRepository {
    pool: MySqlPool,
}

impl MySqlConfirmedEmailRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_confirmed(row: &sqlx::mysql::MySqlRow) -> Result<ConfirmedEmail, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        Ok(ConfirmedEmail {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid confirmation UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            confirmed_at: row.try_get::<DateTime<Utc>, _>("confirmed_at").map_err(|e| {
                DomainError::Internal {
                    message: format!("Failed to get confirmed_at: {}", e),
                }
            })?,
        })
    }
}

#[async_trait]
impl ConfirmedEmailRepository for MySqlConfirmedEmailRepository {
    async fn record(
        &self,
        email: &str,
        confirmed_at: DateTime<Utc>,
    ) -> Result<ConfirmedEmail, DomainError> {
        let candidate = ConfirmedEmail::new(email, confirmed_at);

        // Keep the first confirmation if the address is already present
        let insert = r#"
            INSERT IGNORE INTO confirmed_emails (id, email, confirmed_at)
            VALUES (?, ?, ?)
        "#;

        sqlx::query(insert)
            .bind(candidate.id.to_string())
            .bind(&candidate.email)
            .bind(candidate.confirmed_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::from(InfrastructureError::Database(e)))?;

        self.find_by_email(email).await?.ok_or_else(|| DomainError::Internal {
            message: "Confirmed email missing after insert".to_string(),
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<ConfirmedEmail>, DomainError> {
        let query = r#"
            SELECT id, email, confirmed_at
            FROM confirmed_emails
            WHERE email = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::from(InfrastructureError::Database(e)))?;

        match row {
            Some(row) => Ok(Some(Self::row_to_confirmed(&row)?)),
            None => Ok(None),
        }
    }
}
