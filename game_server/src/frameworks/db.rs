use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{info, warn};

// Build a small PostgreSQL pool for the game server.
pub async fn connect_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Connects with up to `attempts` tries, doubling the pause after each failure.
/// Returns the last error once every attempt has failed.
pub async fn connect_with_retry(
    database_url: &str,
    attempts: u32,
    initial_backoff: Duration,
) -> Result<PgPool, sqlx::Error> {
    let attempts = attempts.max(1);
    let mut backoff = initial_backoff;
    let mut attempt = 1;

    loop {
        match connect_pool(database_url).await {
            Ok(pool) => {
                info!(attempt, "database connected");
                return Ok(pool);
            }
            Err(err) if attempt < attempts => {
                warn!(
                    attempt,
                    attempts,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %err,
                    "database connect failed; retrying"
                );
                tokio::time::sleep(backoff).await;
                backoff = backoff.saturating_mul(2);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

// Run database migrations for the game server.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
    MIGRATOR.run(pool).await
}
