use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth;
use crate::database::models::User;
use crate::error::ApiError;
use crate::services::users;
use crate::AppState;

/// Authenticated user context attached to the request after token
/// verification. Downstream handlers and the authorization guard read this
/// instead of re-querying the database.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub account_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub permissions: Vec<String>,
    pub status: String,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            account_id: user.account_id,
            email: user.email,
            name: user.name,
            role: user.role,
            permissions: user.permissions,
            status: user.status,
        }
    }
}

/// Bearer-token authentication middleware.
///
/// Verifies the token, re-loads the user it references, rejects inactive
/// users, and injects the resolved [`AuthUser`] into request extensions.
/// Every failure is terminal for the request; there are no retries.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims = auth::verify_jwt(&token, &state.config.jwt_secret)
        .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

    // Any lookup failure here reads as unauthorized; the token's subject
    // could not be resolved to an active user.
    let user = users::show_by_email(&state.pool, &claims.email)
        .await
        .map_err(|_| ApiError::unauthorized("Unauthorized"))?
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    if user.status != "active" {
        return Err(ApiError::unauthorized(
            "Unauthorized, your account is not active",
        ));
    }

    request.extensions_mut().insert(AuthUser::from(user));
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
