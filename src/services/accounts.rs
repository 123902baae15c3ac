use chrono::Utc;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::database::models::Account;
use crate::services::{log_db_error, ServiceError};
use crate::types::Status;

/// Insert a new account. Runs on any executor so signup can place it inside
/// the same transaction as the first user.
pub async fn create<'e>(
    db: impl PgExecutor<'e>,
    status: Status,
    users_limit: i32,
    users_used: i32,
) -> Result<Account, ServiceError> {
    let now = Utc::now();
    sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (id, status, users_limit, users_used, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, status, users_limit, users_used, created_at, updated_at",
    )
    .bind(Uuid::new_v4())
    .bind(status.as_str())
    .bind(users_limit)
    .bind(users_used)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await
    .map_err(|e| {
        log_db_error("accounts.create", &e);
        e.into()
    })
}

pub async fn show<'e>(db: impl PgExecutor<'e>, id: Uuid) -> Result<Option<Account>, ServiceError> {
    sqlx::query_as::<_, Account>(
        "SELECT id, status, users_limit, users_used, created_at, updated_at
         FROM accounts WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .map_err(|e| {
        log_db_error("accounts.show", &e);
        e.into()
    })
}

pub async fn delete<'e>(db: impl PgExecutor<'e>, id: Uuid) -> Result<Option<Account>, ServiceError> {
    sqlx::query_as::<_, Account>(
        "DELETE FROM accounts WHERE id = $1
         RETURNING id, status, users_limit, users_used, created_at, updated_at",
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .map_err(|e| {
        log_db_error("accounts.delete", &e);
        e.into()
    })
}
