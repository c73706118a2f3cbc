//! Database operations for the attendance ledger (`PostgreSQL`).
//!
//! ## Tables
//!
//! - `attendance_events` - append-only check-in ledger, unique on
//!   `(user_id, attendance_date)`
//! - `user_stats` - per-user aggregate (current/max streak, total days,
//!   last attendance date), written only in the same transaction as the
//!   event it is derived from
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/ledger/migrations/` and run
//! explicitly, never at service startup:
//! ```bash
//! cargo run -p rollcall-cli -- migrate
//! ```

pub mod attendance;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::config::LedgerConfig;

pub use attendance::AttendanceRepository;

/// Embedded schema migrations for the ledger database.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
///
/// Expected domain outcomes are not errors: a duplicate check-in surfaces as
/// `accepted = false` and a user with no history as `None`. This enum is
/// reserved for failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create the pool with a bounded number of attempts.
///
/// Database containers often come up after the application; this retries
/// pool initialization `config.connect_attempts` times with a fixed backoff
/// and then fails definitively. Runs once at startup, never on the
/// per-request path.
///
/// # Errors
///
/// Returns the final `sqlx::Error` after the last attempt fails.
pub async fn connect_with_retry(config: &LedgerConfig) -> Result<PgPool, sqlx::Error> {
    let mut attempt: u32 = 1;
    loop {
        match create_pool(&config.database_url).await {
            Ok(pool) => {
                tracing::info!(attempt, "database pool created");
                return Ok(pool);
            }
            Err(err) if attempt < config.connect_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = config.connect_attempts,
                    error = %err,
                    "database connection failed, retrying"
                );
                tokio::time::sleep(config.connect_backoff).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
