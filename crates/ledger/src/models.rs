//! Result types returned by the ledger operations.

use serde::{Deserialize, Serialize};

use rollcall_core::{UserId, UserStats};

/// The result of a check-in attempt.
///
/// A duplicate check-in is a defined outcome, not an error: `accepted` is
/// `false` and `stats` reflects the stored state, which is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInOutcome {
    /// Whether a new event was recorded.
    pub accepted: bool,
    /// The user's aggregate after the attempt.
    pub stats: UserStats,
}

/// Server-wide attendance counts for a single civil date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStats {
    /// Distinct users with a check-in on the as-of date.
    pub today_count: i64,
    /// Distinct users that have ever checked in.
    pub total_users: i64,
}

/// One row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// The ranked user.
    pub user_id: UserId,
    /// The value of the ranked metric for that user.
    pub value: i32,
}

/// All three top-N leaderboards, read as one consistent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rankings {
    /// Top users by current streak.
    pub current_streak: Vec<LeaderboardEntry>,
    /// Top users by longest streak ever reached.
    pub max_streak: Vec<LeaderboardEntry>,
    /// Top users by lifetime check-in days.
    pub total_days: Vec<LeaderboardEntry>,
}
