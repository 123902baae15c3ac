use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

/// Open the process-wide database pool.
///
/// Sized to a single connection: every query serializes through it, matching
/// the resource model the API was designed around. The async runtime
/// multiplexes concurrent requests at each await point instead.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;
    info!("database connection established");
    Ok(pool)
}

/// Pings the pool to ensure connectivity.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Close the pool on shutdown.
pub async fn close(pool: &PgPool) {
    pool.close().await;
    info!("database connection closed");
}
