//! Database migration command.

use sqlx::PgPool;

use rollcall_ledger::db::MIGRATOR;

/// Run the ledger migrations against the connected database.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails to apply.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running ledger migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}
