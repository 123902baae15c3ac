use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth;
use crate::error::ApiError;
use crate::handlers::paginated;
use crate::middleware::auth::AuthUser;
use crate::services::users::{self, NewUser};
use crate::types::{Pagination, Permission, Role, Status};
use crate::validate;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
    pub permissions: Vec<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub status: Option<String>,
}

/// POST /users - add a user to the caller's account (admin only).
pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate::name(&payload.name, 15).map_err(ApiError::bad_request)?;
    validate::email(&payload.email).map_err(ApiError::bad_request)?;
    validate::password(&payload.password).map_err(ApiError::bad_request)?;

    let role = match payload.role.as_deref() {
        Some(raw) => Role::parse(raw).ok_or_else(|| ApiError::bad_request("Unknown role"))?,
        None => Role::Viewer,
    };
    let status = match payload.status.as_deref() {
        Some(raw) => Status::parse(raw).ok_or_else(|| ApiError::bad_request("Unknown status"))?,
        None => Status::Active,
    };
    for permission in &payload.permissions {
        if Permission::parse(permission).is_none() {
            return Err(ApiError::bad_request(format!(
                "Unknown permission: {}",
                permission
            )));
        }
    }

    if users::show_by_email(&state.pool, &payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(format!(
            "User with email: {} already exists",
            payload.email
        )));
    }

    let hashed = auth::hash_password(&payload.password, state.config.bcrypt_cost)?;

    users::create(
        &state.pool,
        NewUser {
            account_id: caller.account_id,
            email: payload.email,
            name: payload.name,
            password: hashed,
            status: status.as_str().to_string(),
            role: role.as_str().to_string(),
            permissions: payload.permissions,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": true,
            "response": "User created!",
        })),
    ))
}

/// GET /users/:id - show one user within the caller's account.
pub async fn show(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let user = users::show(&state.pool, caller.account_id, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No data found"))?;

    Ok(Json(json!({
        "status": true,
        "response": user.sanitized(),
    })))
}

/// GET /users - paginated listing of the caller's account.
pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Query(page): Query<Pagination>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = users::list(&state.pool, caller.account_id, page).await?;
    let total = users::count(&state.pool, caller.account_id).await?;

    let rows: Vec<_> = rows.into_iter().map(|u| u.sanitized()).collect();
    Ok(paginated(total, page, rows))
}

/// PATCH /users - update the authenticated user's own name/status.
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate::name(&payload.name, 15).map_err(ApiError::bad_request)?;
    let status = match payload.status.as_deref() {
        Some(raw) => Status::parse(raw).ok_or_else(|| ApiError::bad_request("Unknown status"))?,
        None => Status::Active,
    };

    let user = users::update(
        &state.pool,
        caller.account_id,
        caller.id,
        &payload.name,
        status.as_str(),
    )
    .await?
    .ok_or_else(|| ApiError::not_implemented("Unable to update user at this moment"))?;

    Ok(Json(json!({
        "status": true,
        "response": user.sanitized(),
    })))
}

/// DELETE /users/:id - remove a user from the caller's account.
pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    users::delete(&state.pool, caller.account_id, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Either already deleted or does not exist"))?;

    Ok(Json(json!({
        "status": true,
        "response": "Deleted successfully!",
    })))
}
