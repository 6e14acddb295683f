//! Schema migrations.

use sqlx::PgPool;
use tracing::info;

use market_core::error::{AppError, ErrorKind};
use market_core::result::AppResult;

/// Apply every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Applying database migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to run migrations: {e}"),
                e,
            )
        })?;

    info!("Database schema is up to date");
    Ok(())
}
