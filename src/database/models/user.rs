use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named credential within an account. The `password` field holds the
/// bcrypt hash in the database and must be blanked before serialization;
/// [`User::sanitized`] is the only sanctioned path into a response body.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub account_id: Uuid,
    pub email: String,
    pub name: String,
    pub password: String,
    pub status: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Clear the password hash ahead of serialization.
    pub fn sanitized(mut self) -> Self {
        self.password = String::new();
        self
    }
}
