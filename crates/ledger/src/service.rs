//! The attendance service facade consumed by command adapters.
//!
//! Adapters (chat commands, the CLI) call these methods with raw strings
//! and civil dates; the service validates input before any storage access
//! and never produces user-facing text. Converting a user's local "now" to
//! the canonical civil date happens in the adapter, not here.

use chrono::NaiveDate;
use sqlx::PgPool;
use thiserror::Error;

use rollcall_core::{Metric, UserId, UserIdError, UserStats};

use crate::db::{AttendanceRepository, RepositoryError};
use crate::models::{CheckInOutcome, LeaderboardEntry, Rankings, ServerStats};

/// Application-level error type for attendance operations.
///
/// Domain outcomes are not errors: a duplicate check-in is
/// `accepted = false` and an unknown user is `Ok(None)`.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// User id rejected before any storage access.
    #[error("invalid user id: {0}")]
    InvalidUserId(#[from] UserIdError),

    /// (year, month) does not name a real calendar month.
    #[error("{year}-{month:02} is not a valid calendar month")]
    InvalidMonth { year: i32, month: u32 },

    /// Storage operation failed; propagated unmodified.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The attendance ledger service.
///
/// Owns the connection pool; construct once at startup and share. All
/// methods are safe to call concurrently - `check_in` is the only mutating
/// operation and is atomic per call.
pub struct AttendanceService {
    pool: PgPool,
}

impl AttendanceService {
    /// Create a service over an initialized connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool (e.g. for running migrations or health
    /// checks).
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn repo(&self) -> AttendanceRepository<'_> {
        AttendanceRepository::new(&self.pool)
    }

    /// Record a check-in for `user_id` on `today`.
    ///
    /// At most one check-in per user per civil date: a repeat attempt
    /// returns `accepted = false` with the stored stats unchanged.
    ///
    /// # Errors
    ///
    /// Returns `AttendanceError::InvalidUserId` before any storage access,
    /// or `AttendanceError::Repository` if the transaction fails.
    pub async fn check_in(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> Result<CheckInOutcome, AttendanceError> {
        let user_id = UserId::parse(user_id)?;
        let outcome = self.repo().record_check_in(&user_id, today).await?;

        if outcome.accepted {
            tracing::info!(
                user_id = %user_id,
                date = %today,
                streak = outcome.stats.current_streak,
                total_days = outcome.stats.total_days,
                "check-in recorded"
            );
        } else {
            tracing::debug!(user_id = %user_id, date = %today, "duplicate check-in ignored");
        }

        Ok(outcome)
    }

    /// A user's aggregate stats, or `None` for a user with no history.
    ///
    /// # Errors
    ///
    /// Returns `AttendanceError::InvalidUserId` before any storage access,
    /// or `AttendanceError::Repository` if the query fails.
    pub async fn stats(&self, user_id: &str) -> Result<Option<UserStats>, AttendanceError> {
        let user_id = UserId::parse(user_id)?;
        Ok(self.repo().get_stats(&user_id).await?)
    }

    /// A user's check-in dates within one calendar month, ascending.
    ///
    /// # Errors
    ///
    /// Returns `AttendanceError::InvalidUserId` or
    /// `AttendanceError::InvalidMonth` before any storage access, or
    /// `AttendanceError::Repository` if the query fails.
    pub async fn monthly_days(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<NaiveDate>, AttendanceError> {
        let user_id = UserId::parse(user_id)?;
        let (first, last) =
            month_bounds(year, month).ok_or(AttendanceError::InvalidMonth { year, month })?;
        Ok(self
            .repo()
            .get_events_in_range(&user_id, first, last)
            .await?)
    }

    /// Server-wide counts as of one civil date.
    ///
    /// # Errors
    ///
    /// Returns `AttendanceError::Repository` if the query fails.
    pub async fn server_stats(&self, as_of: NaiveDate) -> Result<ServerStats, AttendanceError> {
        Ok(self.repo().get_server_stats(as_of).await?)
    }

    /// Top `limit` users ranked by `metric`.
    ///
    /// # Errors
    ///
    /// Returns `AttendanceError::Repository` if the query fails.
    pub async fn leaderboard(
        &self,
        metric: Metric,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>, AttendanceError> {
        Ok(self.repo().get_top_n(metric, limit).await?)
    }

    /// All three top-`limit` leaderboards as one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AttendanceError::Repository` if a query fails.
    pub async fn rankings(&self, limit: u32) -> Result<Rankings, AttendanceError> {
        Ok(self.repo().get_rankings(limit).await?)
    }
}

/// First and last day of a calendar month, or `None` if (year, month) is
/// not a real month.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_month.pred_opt()?))
}
