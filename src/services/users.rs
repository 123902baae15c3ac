use chrono::Utc;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::database::models::User;
use crate::services::{log_db_error, ServiceError};
use crate::types::Pagination;

const USER_COLUMNS: &str =
    "id, account_id, email, name, password, status, role, permissions, created_at, updated_at";

/// Fields required to insert a user row; the password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub account_id: Uuid,
    pub email: String,
    pub name: String,
    pub password: String,
    pub status: String,
    pub role: String,
    pub permissions: Vec<String>,
}

pub async fn create<'e>(db: impl PgExecutor<'e>, new: NewUser) -> Result<User, ServiceError> {
    let now = Utc::now();
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (id, account_id, email, name, password, status, role, permissions, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(new.account_id)
    .bind(&new.email)
    .bind(&new.name)
    .bind(&new.password)
    .bind(&new.status)
    .bind(&new.role)
    .bind(&new.permissions)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await
    .map_err(|e| {
        log_db_error("users.create", &e);
        e.into()
    })
}

/// Lookup by email, the system-wide unique key. Used by signup's duplicate
/// check, signin, and the authentication middleware.
pub async fn show_by_email<'e>(
    db: impl PgExecutor<'e>,
    email: &str,
) -> Result<Option<User>, ServiceError> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(db)
    .await
    .map_err(|e| {
        log_db_error("users.show_by_email", &e);
        e.into()
    })
}

/// Lookup by id, scoped to the caller's account for tenant isolation.
pub async fn show<'e>(
    db: impl PgExecutor<'e>,
    account_id: Uuid,
    user_id: Uuid,
) -> Result<Option<User>, ServiceError> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE account_id = $1 AND id = $2"
    ))
    .bind(account_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .map_err(|e| {
        log_db_error("users.show", &e);
        e.into()
    })
}

pub async fn list<'e>(
    db: impl PgExecutor<'e>,
    account_id: Uuid,
    page: Pagination,
) -> Result<Vec<User>, ServiceError> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE account_id = $1
         ORDER BY created_at OFFSET $2 LIMIT $3"
    ))
    .bind(account_id)
    .bind(page.offset)
    .bind(page.limit)
    .fetch_all(db)
    .await
    .map_err(|e| {
        log_db_error("users.list", &e);
        e.into()
    })
}

pub async fn update<'e>(
    db: impl PgExecutor<'e>,
    account_id: Uuid,
    user_id: Uuid,
    name: &str,
    status: &str,
) -> Result<Option<User>, ServiceError> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET name = $1, status = $2, updated_at = $3
         WHERE account_id = $4 AND id = $5
         RETURNING {USER_COLUMNS}"
    ))
    .bind(name)
    .bind(status)
    .bind(Utc::now())
    .bind(account_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .map_err(|e| {
        log_db_error("users.update", &e);
        e.into()
    })
}

pub async fn delete<'e>(
    db: impl PgExecutor<'e>,
    account_id: Uuid,
    user_id: Uuid,
) -> Result<Option<User>, ServiceError> {
    sqlx::query_as::<_, User>(&format!(
        "DELETE FROM users WHERE account_id = $1 AND id = $2
         RETURNING {USER_COLUMNS}"
    ))
    .bind(account_id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .map_err(|e| {
        log_db_error("users.delete", &e);
        e.into()
    })
}

pub async fn count<'e>(db: impl PgExecutor<'e>, account_id: Uuid) -> Result<i64, ServiceError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            log_db_error("users.count", &e);
            e.into()
        })
}
