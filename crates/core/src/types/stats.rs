//! Per-user attendance aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The mutable aggregate derived from a user's check-in history.
///
/// Kept in lock-step with the append-only event ledger: every field is
/// updated in the same transaction that records the event it was derived
/// from.
///
/// Invariants maintained by the ledger:
///
/// - `total_days` equals the number of recorded check-in events
/// - `max_streak` is the largest `current_streak` ever reached and never
///   decreases
/// - `current_streak` counts the run of consecutive calendar dates ending at
///   `last_attendance_date`
/// - `last_attendance_date` is the date of the most recent event, or `None`
///   for a user with no history (such a row is never stored)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Length of the current run of consecutive check-in days.
    pub current_streak: i32,
    /// Longest run of consecutive check-in days ever reached.
    pub max_streak: i32,
    /// Lifetime count of check-in days.
    pub total_days: i32,
    /// Date of the most recent check-in.
    pub last_attendance_date: Option<NaiveDate>,
}

impl UserStats {
    /// The aggregate produced by a user's first ever check-in.
    #[must_use]
    pub const fn first_check_in(date: NaiveDate) -> Self {
        Self {
            current_streak: 1,
            max_streak: 1,
            total_days: 1,
            last_attendance_date: Some(date),
        }
    }
}
