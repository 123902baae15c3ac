pub mod accounts;
pub mod documents;
pub mod users;

use thiserror::Error;

/// Unified outcome at the data-access boundary.
///
/// Every service call either yields its value (with `Option` for lookups
/// that may miss) or this error; callers translate it into the generic
/// "try again later" response without leaking diagnostics.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub(crate) fn log_db_error(operation: &str, err: &sqlx::Error) {
    tracing::error!("something went wrong at database end during {}: {}", operation, err);
}
