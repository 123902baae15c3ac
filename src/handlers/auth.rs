use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::services::users::NewUser;
use crate::services::{accounts, users};
use crate::types::{Permission, Role, Status};
use crate::validate;
use crate::AppState;

/// Seats granted to a freshly provisioned account.
const SIGNUP_USERS_LIMIT: i32 = 5;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/signup - provision an account plus its first (admin) user.
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate::name(&payload.name, 20).map_err(ApiError::bad_request)?;
    validate::email(&payload.email).map_err(ApiError::bad_request)?;
    validate::password(&payload.password).map_err(ApiError::bad_request)?;

    if users::show_by_email(&state.pool, &payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(format!(
            "User with email: {} already exists, please signin",
            payload.email
        )));
    }

    let hashed = auth::hash_password(&payload.password, state.config.bcrypt_cost)?;

    // Account and first user land together or not at all.
    let mut tx = state.pool.begin().await?;

    let account = accounts::create(&mut *tx, Status::Active, SIGNUP_USERS_LIMIT, 1).await?;

    let user = users::create(
        &mut *tx,
        NewUser {
            account_id: account.id,
            email: payload.email,
            name: payload.name,
            password: hashed,
            status: Status::Active.as_str().to_string(),
            role: Role::Admin.as_str().to_string(),
            permissions: Permission::ALL
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        },
    )
    .await?;

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": true,
            "response": user.sanitized(),
        })),
    ))
}

/// POST /auth/signin - verify credentials and issue a bearer token.
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = users::show_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "No user exists with email: {}, please signup",
                payload.email
            ))
        })?;

    if !auth::verify_password(&payload.password, &user.password)? {
        return Err(ApiError::bad_request("Incorrect password"));
    }

    let claims = Claims::new(
        user.id,
        user.account_id,
        user.email.clone(),
        state.config.jwt_expiry_days,
    );
    let token = auth::generate_jwt(&claims, &state.config.jwt_secret)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": true,
            "response": user.sanitized(),
            "token": token,
        })),
    ))
}
