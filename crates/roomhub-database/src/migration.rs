//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use roomhub_core::error::{AppError, ErrorKind};

/// Apply any pending migrations from the workspace `migrations/` directory.
///
/// Safe to run on every startup; already-applied migrations are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!("Applying pending database migrations");

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
