pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod imaging;
pub mod middleware;
pub mod services;
pub mod storage;
pub mod types;
pub mod validate;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as layers,
    routing::{delete, get, post},
    Extension, Router,
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::middleware::auth::require_auth;
use crate::middleware::guard::{self, Requirement};
use crate::storage::Storage;
use crate::types::{Permission, Role};

/// Shared application state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub storage: Storage,
    pub config: Arc<AppConfig>,
}

/// Build the router. Authorization requirements are declared right here in
/// the route table, next to the handler they protect.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(user_routes(&state))
        .merge(doc_routes(&state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/signin", post(handlers::auth::signin))
}

/// User management, admin-only across the board.
fn user_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            post(handlers::users::create)
                .get(handlers::users::list)
                .patch(handlers::users::update),
        )
        .route(
            "/users/:id",
            get(handlers::users::show).delete(handlers::users::remove),
        )
        .route_layer(layers::from_fn(guard::authorize))
        .route_layer(Extension(Requirement::roles([Role::Admin])))
        .layer(layers::from_fn_with_state(state.clone(), require_auth))
}

/// Document upload/listing. Only the upload requires a permission; list and
/// delete pass on authentication alone.
fn doc_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/docs",
            post(handlers::docs::upload)
                .route_layer(layers::from_fn(guard::authorize))
                .route_layer(Extension(Requirement::permissions([Permission::Create])))
                .get(handlers::docs::list),
        )
        .route("/docs/:id", delete(handlers::docs::remove))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(layers::from_fn_with_state(state.clone(), require_auth))
}
