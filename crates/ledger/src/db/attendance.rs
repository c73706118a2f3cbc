//! Attendance repository: the transactional write path and the reporting
//! reads.
//!
//! The uniqueness constraint on `attendance_events (user_id,
//! attendance_date)` is the at-most-once-per-day guarantee. A prior
//! existence check followed by a separate insert is inherently racy, so the
//! insert is always attempted and a uniqueness violation is translated into
//! a rejected check-in rather than an error.

use chrono::NaiveDate;
use sqlx::PgPool;

use rollcall_core::{Metric, UserId, UserStats};

use super::RepositoryError;
use crate::models::{CheckInOutcome, LeaderboardEntry, Rankings, ServerStats};
use crate::streak;

/// Raw `user_stats` row, decoded once at the storage boundary.
#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    current_streak: i32,
    max_streak: i32,
    total_days: i32,
    last_attendance_date: Option<NaiveDate>,
}

impl From<StatsRow> for UserStats {
    fn from(row: StatsRow) -> Self {
        Self {
            current_streak: row.current_streak,
            max_streak: row.max_streak,
            total_days: row.total_days,
            last_attendance_date: row.last_attendance_date,
        }
    }
}

/// Raw leaderboard row: a user id plus the value of the ranked metric.
#[derive(Debug, sqlx::FromRow)]
struct LeaderboardRow {
    user_id: String,
    value: i32,
}

impl LeaderboardRow {
    fn into_entry(self) -> Result<LeaderboardEntry, RepositoryError> {
        let user_id = UserId::parse(&self.user_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid user id in database: {e}"))
        })?;
        Ok(LeaderboardEntry {
            user_id,
            value: self.value,
        })
    }
}

fn event_without_stats() -> RepositoryError {
    RepositoryError::DataCorruption(
        "attendance event exists without a user_stats row".to_owned(),
    )
}

/// Repository for attendance ledger operations.
pub struct AttendanceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AttendanceRepository<'a> {
    /// Create a new attendance repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Whether a check-in event exists for (user, date).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn has_event(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM attendance_events
                WHERE user_id = $1 AND attendance_date = $2
            )
            ",
        )
        .bind(user_id.as_str())
        .bind(date)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Record a check-in for (user, date): the single atomic entry point.
    ///
    /// Inside one transaction: make sure the user's aggregate row exists
    /// and lock it, reject a duplicate for the same date, advance the
    /// streak, and write the updated aggregate together with the new event
    /// row. Either both rows land or neither does.
    ///
    /// Two concurrent calls for the same user serialize on the aggregate
    /// row lock, so exactly one of two same-date calls is accepted. The
    /// uniqueness constraint on the event table remains the backstop: an
    /// insert that loses a race rolls the whole transaction back and is
    /// reported as a duplicate, never as a partial write.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` on transaction or connection
    /// failure, `RepositoryError::DataCorruption` if an event exists for a
    /// user with no aggregate history.
    pub async fn record_check_in(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<CheckInOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Bootstrap the aggregate row so there is always something to lock;
        // rolled back with the rest of the transaction if nothing is recorded.
        sqlx::query(
            r"
            INSERT INTO user_stats (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(user_id.as_str())
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, StatsRow>(
            r"
            SELECT current_streak, max_streak, total_days, last_attendance_date
            FROM user_stats
            WHERE user_id = $1
            FOR UPDATE
            ",
        )
        .bind(user_id.as_str())
        .fetch_one(&mut *tx)
        .await?;

        // A freshly bootstrapped row has no history yet.
        let previous: Option<UserStats> = (row.total_days > 0).then(|| UserStats::from(row));

        let already = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM attendance_events
                WHERE user_id = $1 AND attendance_date = $2
            )
            ",
        )
        .bind(user_id.as_str())
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        if already {
            let stats = previous.ok_or_else(event_without_stats)?;
            tx.rollback().await?;
            return Ok(CheckInOutcome {
                accepted: false,
                stats,
            });
        }

        let next = streak::advance(previous.as_ref(), date);

        sqlx::query(
            r"
            UPDATE user_stats
            SET current_streak = $2,
                max_streak = $3,
                total_days = $4,
                last_attendance_date = $5
            WHERE user_id = $1
            ",
        )
        .bind(user_id.as_str())
        .bind(next.current_streak)
        .bind(next.max_streak)
        .bind(next.total_days)
        .bind(next.last_attendance_date)
        .execute(&mut *tx)
        .await?;

        let inserted = sqlx::query(
            r"
            INSERT INTO attendance_events (user_id, attendance_date)
            VALUES ($1, $2)
            ",
        )
        .bind(user_id.as_str())
        .bind(date)
        .execute(&mut *tx)
        .await;

        if let Err(e) = inserted {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                // Lost a race with a concurrent check-in for the same date.
                // Roll back our aggregate update and report the committed state.
                tx.rollback().await?;
                let stats = self
                    .get_stats(user_id)
                    .await?
                    .ok_or_else(event_without_stats)?;
                return Ok(CheckInOutcome {
                    accepted: false,
                    stats,
                });
            }
            return Err(RepositoryError::Database(e));
        }

        tx.commit().await?;

        Ok(CheckInOutcome {
            accepted: true,
            stats: next,
        })
    }

    /// Get a user's aggregate stats, or `None` for a user with no history.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_stats(&self, user_id: &UserId) -> Result<Option<UserStats>, RepositoryError> {
        let row = sqlx::query_as::<_, StatsRow>(
            r"
            SELECT current_streak, max_streak, total_days, last_attendance_date
            FROM user_stats
            WHERE user_id = $1
            ",
        )
        .bind(user_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(UserStats::from))
    }

    /// All of a user's check-in dates in `[start, end]`, ascending.
    ///
    /// One-shot snapshot read used for monthly reporting.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_events_in_range(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, RepositoryError> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            r"
            SELECT attendance_date
            FROM attendance_events
            WHERE user_id = $1 AND attendance_date BETWEEN $2 AND $3
            ORDER BY attendance_date ASC
            ",
        )
        .bind(user_id.as_str())
        .bind(start)
        .bind(end)
        .fetch_all(self.pool)
        .await?;

        Ok(dates)
    }

    /// Server-wide counts: users checked in on `as_of`, and users ever
    /// registered. Both counts are read inside one transaction so they are
    /// a single consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_server_stats(&self, as_of: NaiveDate) -> Result<ServerStats, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let today_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT user_id) FROM attendance_events WHERE attendance_date = $1",
        )
        .bind(as_of)
        .fetch_one(&mut *tx)
        .await?;

        let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM user_stats")
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(ServerStats {
            today_count,
            total_users,
        })
    }

    /// Top `limit` users ranked by `metric`.
    ///
    /// Ties are broken by `total_days` descending, then by earliest
    /// registration (`created_at` ascending) as a stable, deterministic
    /// final order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored user id is invalid.
    pub async fn get_top_n(
        &self,
        metric: Metric,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        top_n(&mut conn, metric, limit).await
    }

    /// All three top-`limit` leaderboards read inside one transaction, so
    /// the three lists reflect a single point-in-time snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a stored user id is invalid.
    pub async fn get_rankings(&self, limit: u32) -> Result<Rankings, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current_streak = top_n(&mut tx, Metric::CurrentStreak, limit).await?;
        let max_streak = top_n(&mut tx, Metric::MaxStreak, limit).await?;
        let total_days = top_n(&mut tx, Metric::TotalDays, limit).await?;

        tx.commit().await?;

        Ok(Rankings {
            current_streak,
            max_streak,
            total_days,
        })
    }
}

/// Shared top-N query; `column` comes from the fixed [`Metric`] enum, never
/// from caller input.
async fn top_n(
    conn: &mut sqlx::PgConnection,
    metric: Metric,
    limit: u32,
) -> Result<Vec<LeaderboardEntry>, RepositoryError> {
    let sql = format!(
        r"
        SELECT user_id, {column} AS value
        FROM user_stats
        ORDER BY {column} DESC, total_days DESC, created_at ASC
        LIMIT $1
        ",
        column = metric.column()
    );

    let rows = sqlx::query_as::<_, LeaderboardRow>(&sql)
        .bind(i64::from(limit))
        .fetch_all(conn)
        .await?;

    rows.into_iter().map(LeaderboardRow::into_entry).collect()
}
