use chrono::Utc;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::database::models::Document;
use crate::services::{log_db_error, ServiceError};
use crate::types::Pagination;

const DOCUMENT_COLUMNS: &str =
    "id, account_id, user_id, url, size, title, description, status, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub account_id: Uuid,
    pub user_id: Uuid,
    pub url: String,
    pub size: i64,
    pub title: String,
    pub description: String,
    pub status: String,
}

pub async fn create<'e>(
    db: impl PgExecutor<'e>,
    new: NewDocument,
) -> Result<Document, ServiceError> {
    let now = Utc::now();
    sqlx::query_as::<_, Document>(&format!(
        "INSERT INTO documents (id, account_id, user_id, url, size, title, description, status, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING {DOCUMENT_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(new.account_id)
    .bind(new.user_id)
    .bind(&new.url)
    .bind(new.size)
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.status)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await
    .map_err(|e| {
        log_db_error("documents.create", &e);
        e.into()
    })
}

pub async fn list<'e>(
    db: impl PgExecutor<'e>,
    account_id: Uuid,
    page: Pagination,
) -> Result<Vec<Document>, ServiceError> {
    sqlx::query_as::<_, Document>(&format!(
        "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE account_id = $1
         ORDER BY created_at OFFSET $2 LIMIT $3"
    ))
    .bind(account_id)
    .bind(page.offset)
    .bind(page.limit)
    .fetch_all(db)
    .await
    .map_err(|e| {
        log_db_error("documents.list", &e);
        e.into()
    })
}

pub async fn delete<'e>(
    db: impl PgExecutor<'e>,
    account_id: Uuid,
    doc_id: Uuid,
) -> Result<Option<Document>, ServiceError> {
    sqlx::query_as::<_, Document>(&format!(
        "DELETE FROM documents WHERE account_id = $1 AND id = $2
         RETURNING {DOCUMENT_COLUMNS}"
    ))
    .bind(account_id)
    .bind(doc_id)
    .fetch_optional(db)
    .await
    .map_err(|e| {
        log_db_error("documents.delete", &e);
        e.into()
    })
}

pub async fn count<'e>(db: impl PgExecutor<'e>, account_id: Uuid) -> Result<i64, ServiceError> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM documents WHERE account_id = $1")
        .bind(account_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            log_db_error("documents.count", &e);
            e.into()
        })
}
