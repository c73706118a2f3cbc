//! Pure streak-engine scenarios and input-validation behavior.
//!
//! These run without a database: the streak decision is pure logic, and the
//! validation tests use a lazily connected pool that would error on any
//! actual query.

#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;

use rollcall_core::UserStats;
use rollcall_ledger::streak;
use rollcall_ledger::{AttendanceError, AttendanceService};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Streak Scenarios
// =============================================================================

#[test]
fn scenario_consecutive_then_gap() {
    // Check in Jan 1 -> {1,1,1}; Jan 2 -> {2,2,2}; Jan 4 (gap) -> {1,2,3}
    let d1 = streak::advance(None, date(2024, 1, 1));
    assert_eq!((d1.current_streak, d1.max_streak, d1.total_days), (1, 1, 1));

    let d2 = streak::advance(Some(&d1), date(2024, 1, 2));
    assert_eq!((d2.current_streak, d2.max_streak, d2.total_days), (2, 2, 2));

    let d4 = streak::advance(Some(&d2), date(2024, 1, 4));
    assert_eq!((d4.current_streak, d4.max_streak, d4.total_days), (1, 2, 3));
    assert_eq!(d4.last_attendance_date, Some(date(2024, 1, 4)));
}

#[test]
fn scenario_reset_after_any_gap_length() {
    let base = UserStats {
        current_streak: 7,
        max_streak: 9,
        total_days: 30,
        last_attendance_date: Some(date(2024, 5, 1)),
    };

    // Two days, a week, a year - all reset to 1 with no partial credit
    for gap_end in [date(2024, 5, 3), date(2024, 5, 8), date(2025, 5, 1)] {
        let next = streak::advance(Some(&base), gap_end);
        assert_eq!(next.current_streak, 1);
        assert_eq!(next.max_streak, 9);
        assert_eq!(next.total_days, 31);
    }
}

#[test]
fn scenario_streak_equals_trailing_consecutive_run() {
    // For any sequence of dates, current_streak equals the length of the
    // maximal consecutive run ending at the last check-in.
    let sequence = [
        date(2024, 1, 1),
        date(2024, 1, 2),
        date(2024, 1, 3),
        date(2024, 1, 10),
        date(2024, 1, 11),
        date(2024, 1, 12),
        date(2024, 1, 13),
    ];

    let mut stats: Option<UserStats> = None;
    for day in sequence {
        stats = Some(streak::advance(stats.as_ref(), day));
    }

    let stats = stats.unwrap();
    assert_eq!(stats.current_streak, 4);
    assert_eq!(stats.max_streak, 4);
    assert_eq!(stats.total_days, 7);
}

// =============================================================================
// Validation Before Storage
// =============================================================================

/// A pool that parses but never connects. If validation did not happen
/// first, these tests would fail with a connection error instead of the
/// expected input error.
fn unreachable_service() -> AttendanceService {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .connect_lazy("postgres://rollcall@localhost:1/rollcall_unreachable")
        .expect("lazy pool");
    AttendanceService::new(pool)
}

#[tokio::test]
async fn empty_user_id_is_rejected_without_touching_storage() {
    let service = unreachable_service();
    let err = service.check_in("", date(2024, 1, 1)).await.unwrap_err();
    assert!(matches!(err, AttendanceError::InvalidUserId(_)));
}

#[tokio::test]
async fn whitespace_user_id_is_rejected_without_touching_storage() {
    let service = unreachable_service();
    let err = service.stats("not a user").await.unwrap_err();
    assert!(matches!(err, AttendanceError::InvalidUserId(_)));
}

#[tokio::test]
async fn nonexistent_month_is_rejected_without_touching_storage() {
    let service = unreachable_service();

    let err = service.monthly_days("42", 2024, 0).await.unwrap_err();
    assert!(matches!(err, AttendanceError::InvalidMonth { .. }));

    let err = service.monthly_days("42", 2024, 13).await.unwrap_err();
    assert!(matches!(
        err,
        AttendanceError::InvalidMonth {
            year: 2024,
            month: 13
        }
    ));
}
