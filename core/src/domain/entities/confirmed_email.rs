//! Confirmed email entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An address proven reachable by a successful redemption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedEmail {
    /// Unique identifier for the record
    pub id: Uuid,

    /// The confirmed address
    pub email: String,

    /// When the address was confirmed
    pub confirmed_at: DateTime<Utc>,
}

impl ConfirmedEmail {
    pub fn new(email: impl Into<String>, confirmed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            confirmed_at,
        }
    }
}
