use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::paginated;
use crate::imaging;
use crate::middleware::auth::AuthUser;
use crate::services::documents::{self, NewDocument};
use crate::types::Pagination;
use crate::AppState;

/// Bucket folder all document uploads land under.
const UPLOAD_FOLDER: &str = "docs";

/// POST /docs - upload a document (requires the `create` permission).
///
/// The image is recompressed to the fixed 400x400 JPEG policy before it is
/// sent to object storage; only the resulting URL is returned.
pub async fn upload(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut file: Option<Vec<u8>> = None;
    let mut title = String::new();
    let mut description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Unreadable file part: {}", e)))?;
                file = Some(bytes.to_vec());
            }
            Some("title") => {
                title = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Unreadable title: {}", e)))?;
            }
            Some("description") => {
                description = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Unreadable description: {}", e)))?;
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::bad_request("Please provide document"))?;

    let compressed = imaging::compress(&file)
        .map_err(|e| ApiError::bad_request(format!("Unsupported document: {}", e)))?;
    let size = compressed.len() as i64;

    let key = format!(
        "{}/{}-{}.jpg",
        UPLOAD_FOLDER,
        Utc::now().timestamp_millis(),
        caller.name
    );
    let url = state.storage.upload(&key, compressed, "image/jpeg").await?;

    documents::create(
        &state.pool,
        NewDocument {
            account_id: caller.account_id,
            user_id: caller.id,
            url: url.clone(),
            size,
            title,
            description,
            status: "uploaded".to_string(),
        },
    )
    .await
    .map_err(|_| ApiError::not_implemented("Unable to save doc on db, please try again"))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": true,
            "response": url,
        })),
    ))
}

/// GET /docs - paginated listing of the caller's account documents.
pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = documents::list(&state.pool, caller.account_id, page).await?;
    let total = documents::count(&state.pool, caller.account_id).await?;

    Ok(paginated(total, page, rows))
}

/// DELETE /docs/:id - remove a document owned by the caller's account.
pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(doc_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let doc = documents::delete(&state.pool, caller.account_id, doc_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found("Either already deleted or does not belong to your account")
        })?;

    // The row is gone either way; an orphaned blob only costs storage.
    if let Err(e) = state.storage.remove(&doc.url).await {
        tracing::warn!("failed to delete object for document {}: {}", doc.id, e);
    }

    Ok(Json(json!({
        "status": true,
        "response": "Deleted successfully!",
    })))
}
