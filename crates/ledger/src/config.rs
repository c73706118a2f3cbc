//! Ledger configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ROLLCALL_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   the generic `DATABASE_URL`)
//!
//! ## Optional
//! - `ROLLCALL_CONNECT_ATTEMPTS` - pool initialization attempts (default: 5)
//! - `ROLLCALL_CONNECT_BACKOFF_SECS` - delay between attempts (default: 5)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;
const DEFAULT_CONNECT_BACKOFF_SECS: u64 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Ledger configuration.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// How many times pool initialization is attempted before giving up
    pub connect_attempts: u32,
    /// Delay between initialization attempts
    pub connect_backoff: Duration,
}

impl LedgerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or an optional
    /// variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("ROLLCALL_DATABASE_URL")?;
        let connect_attempts =
            get_parsed_or_default("ROLLCALL_CONNECT_ATTEMPTS", DEFAULT_CONNECT_ATTEMPTS)?;
        let backoff_secs = get_parsed_or_default(
            "ROLLCALL_CONNECT_BACKOFF_SECS",
            DEFAULT_CONNECT_BACKOFF_SECS,
        )?;

        Ok(Self {
            database_url,
            connect_attempts: connect_attempts.max(1),
            connect_backoff: Duration::from_secs(backoff_secs),
        })
    }

    /// Build a configuration directly from a database URL, with default
    /// retry policy. Useful for tests and embedding.
    #[must_use]
    pub fn with_database_url(database_url: SecretString) -> Self {
        Self {
            database_url,
            connect_attempts: DEFAULT_CONNECT_ATTEMPTS,
            connect_backoff: Duration::from_secs(DEFAULT_CONNECT_BACKOFF_SECS),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable parsed into `T`, or the default.
fn get_parsed_or_default<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_with_database_url_defaults() {
        let config = LedgerConfig::with_database_url(SecretString::from(
            "postgres://localhost/rollcall_test",
        ));
        assert_eq!(config.connect_attempts, DEFAULT_CONNECT_ATTEMPTS);
        assert_eq!(
            config.connect_backoff,
            Duration::from_secs(DEFAULT_CONNECT_BACKOFF_SECS)
        );
    }
}
