use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use dockside_api::config::AppConfig;
use dockside_api::database::manager;
use dockside_api::storage::Storage;
use dockside_api::{app, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("configuration error: {}", e);
        std::process::exit(1);
    });

    let pool = manager::connect(&config.database_url)
        .await
        .unwrap_or_else(|e| {
            eprintln!("failed to connect to database: {}", e);
            std::process::exit(1);
        });

    let storage = Storage::from_env(config.bucket_name.clone()).await;

    let port = config.port;
    let state = AppState {
        pool: pool.clone(),
        storage,
        config: Arc::new(config),
    };

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("dockside api listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.expect("server");

    manager::close(&pool).await;
}
