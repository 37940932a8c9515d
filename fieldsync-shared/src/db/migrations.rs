/// Database migration runner
///
/// Migrations are plain SQL files in `migrations/` at the workspace root,
/// embedded at compile time via `sqlx::migrate!`. The API server applies
/// them on startup; integration tests apply them to their test database the
/// same way.
///
/// # Example
///
/// ```no_run
/// use fieldsync_shared::db::migrations::run_migrations;
/// use fieldsync_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::info;

/// Applies all pending migrations
///
/// Already-applied migrations are skipped. A failing migration aborts the
/// run and returns the error; startup treats that as fatal.
///
/// # Errors
///
/// Returns an error when a migration fails to execute or the connection is
/// lost mid-run
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Applying pending database migrations");

    sqlx::migrate!("../migrations").run(pool).await?;

    info!("Database schema is up to date");
    Ok(())
}
