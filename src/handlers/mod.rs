pub mod auth;
pub mod docs;
pub mod users;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::database::manager;
use crate::types::Pagination;
use crate::AppState;

/// GET / - public liveness route, also pings the database.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match manager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": true,
                "response": "API server running......",
            })),
        ),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": false,
                    "message": "database unavailable",
                })),
            )
        }
    }
}

/// Standard list envelope: `{status, pagination, response}`.
pub(crate) fn paginated<T: Serialize>(total: i64, page: Pagination, rows: Vec<T>) -> Json<Value> {
    Json(json!({
        "status": true,
        "pagination": {
            "total": total,
            "offset": page.offset,
            "limit": page.limit,
            "returned": rows.len(),
        },
        "response": rows,
    }))
}
