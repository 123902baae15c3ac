use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::types::{Permission, Role};

/// Per-route authorization requirement, declared in the route table at
/// router construction time and carried to the guard as a request extension.
/// Matching is OR across the listed values: holding any one is enough.
#[derive(Debug, Clone)]
pub enum Requirement {
    Permissions(Vec<Permission>),
    Roles(Vec<Role>),
}

impl Requirement {
    pub fn permissions(required: impl IntoIterator<Item = Permission>) -> Self {
        Requirement::Permissions(required.into_iter().collect())
    }

    pub fn roles(required: impl IntoIterator<Item = Role>) -> Self {
        Requirement::Roles(required.into_iter().collect())
    }

    pub fn matches(&self, user: &AuthUser) -> bool {
        match self {
            Requirement::Permissions(required) => required
                .iter()
                .any(|p| user.permissions.iter().any(|held| held == p.as_str())),
            Requirement::Roles(required) => required.iter().any(|r| user.role == r.as_str()),
        }
    }
}

/// Authorization middleware; runs after [`super::auth::require_auth`].
///
/// A route without a declared requirement passes on authentication alone.
pub async fn authorize(request: Request, next: Next) -> Result<Response, ApiError> {
    let Some(requirement) = request.extensions().get::<Requirement>().cloned() else {
        return Ok(next.run(request).await);
    };

    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

    if requirement.matches(user) {
        Ok(next.run(request).await)
    } else {
        Err(ApiError::forbidden("Insufficient permissions"))
    }
}
