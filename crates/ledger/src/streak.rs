//! Streak advancement - the check-in decision.
//!
//! This is pure logic with no I/O. The transactional wrapper in
//! [`crate::db::AttendanceRepository::record_check_in`] guarantees the
//! decision runs against a consistent read of the aggregate and that its
//! result is persisted atomically with the event that caused it.

use chrono::NaiveDate;

use rollcall_core::UserStats;

/// Compute the aggregate that results from recording a check-in on `today`.
///
/// The caller must have already established that no event exists for
/// (user, `today`); duplicates never reach this function.
///
/// Continuity holds iff the previous `last_attendance_date` is exactly the
/// day before `today`. Any other prior date - an older gap of any size, or
/// an inconsistent future date - resets the streak to 1. There is no grace
/// period and no partial credit.
#[must_use]
pub fn advance(previous: Option<&UserStats>, today: NaiveDate) -> UserStats {
    let Some(prev) = previous else {
        return UserStats::first_check_in(today);
    };

    let continues = prev
        .last_attendance_date
        .is_some_and(|last| last.succ_opt() == Some(today));

    let current_streak = if continues { prev.current_streak + 1 } else { 1 };

    UserStats {
        current_streak,
        max_streak: prev.max_streak.max(current_streak),
        total_days: prev.total_days + 1,
        last_attendance_date: Some(today),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_check_in() {
        let stats = advance(None, date(2024, 1, 1));
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.total_days, 1);
        assert_eq!(stats.last_attendance_date, Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_consecutive_day_extends_streak() {
        let day1 = advance(None, date(2024, 1, 1));
        let day2 = advance(Some(&day1), date(2024, 1, 2));
        assert_eq!(day2.current_streak, 2);
        assert_eq!(day2.max_streak, 2);
        assert_eq!(day2.total_days, 2);
    }

    #[test]
    fn test_gap_resets_streak_but_keeps_max() {
        // Check in Jan 1, Jan 2, then skip Jan 3 and check in Jan 4
        let day1 = advance(None, date(2024, 1, 1));
        let day2 = advance(Some(&day1), date(2024, 1, 2));
        let day4 = advance(Some(&day2), date(2024, 1, 4));

        assert_eq!(day4.current_streak, 1);
        assert_eq!(day4.max_streak, 2);
        assert_eq!(day4.total_days, 3);
        assert_eq!(day4.last_attendance_date, Some(date(2024, 1, 4)));
    }

    #[test]
    fn test_any_gap_size_resets_to_one() {
        let prev = UserStats {
            current_streak: 40,
            max_streak: 40,
            total_days: 100,
            last_attendance_date: Some(date(2023, 1, 1)),
        };
        for today in [date(2023, 1, 3), date(2023, 2, 1), date(2024, 1, 1)] {
            let next = advance(Some(&prev), today);
            assert_eq!(next.current_streak, 1, "gap ending {today} must reset");
            assert_eq!(next.max_streak, 40);
            assert_eq!(next.total_days, 101);
        }
    }

    #[test]
    fn test_future_last_attendance_resets() {
        // An inconsistent record (last attendance after today) is treated as
        // a broken run, not continuity.
        let prev = UserStats {
            current_streak: 3,
            max_streak: 3,
            total_days: 3,
            last_attendance_date: Some(date(2024, 6, 10)),
        };
        let next = advance(Some(&prev), date(2024, 6, 5));
        assert_eq!(next.current_streak, 1);
        assert_eq!(next.max_streak, 3);
    }

    #[test]
    fn test_streak_across_month_boundary() {
        let jan31 = advance(None, date(2024, 1, 31));
        let feb1 = advance(Some(&jan31), date(2024, 2, 1));
        assert_eq!(feb1.current_streak, 2);
    }

    #[test]
    fn test_streak_across_leap_day() {
        let feb28 = advance(None, date(2024, 2, 28));
        let feb29 = advance(Some(&feb28), date(2024, 2, 29));
        let mar1 = advance(Some(&feb29), date(2024, 3, 1));
        assert_eq!(mar1.current_streak, 3);
    }

    #[test]
    fn test_max_streak_not_overwritten_by_shorter_run() {
        let mut stats = advance(None, date(2024, 3, 1));
        for day in 2..=5 {
            stats = advance(Some(&stats), date(2024, 3, day));
        }
        assert_eq!(stats.max_streak, 5);

        // New shorter run after a gap
        stats = advance(Some(&stats), date(2024, 3, 10));
        stats = advance(Some(&stats), date(2024, 3, 11));
        assert_eq!(stats.current_streak, 2);
        assert_eq!(stats.max_streak, 5);
    }

    #[test]
    fn test_monotonicity_over_arbitrary_sequence() {
        // max_streak and total_days never decrease, and current_streak
        // always equals the length of the trailing consecutive run.
        let days = [
            date(2024, 1, 1),
            date(2024, 1, 2),
            date(2024, 1, 4),
            date(2024, 1, 5),
            date(2024, 1, 6),
            date(2024, 2, 1),
            date(2024, 2, 2),
        ];
        let mut stats: Option<UserStats> = None;
        let mut prev_max = 0;
        let mut prev_total = 0;
        let mut run = 0;
        let mut last: Option<NaiveDate> = None;

        for today in days {
            let next = advance(stats.as_ref(), today);

            run = if last.is_some_and(|l| l.succ_opt() == Some(today)) {
                run + 1
            } else {
                1
            };
            assert_eq!(next.current_streak, run);
            assert!(next.max_streak >= prev_max);
            assert_eq!(next.total_days, prev_total + 1);

            prev_max = next.max_streak;
            prev_total = next.total_days;
            last = Some(today);
            stats = Some(next);
        }

        let final_stats = stats.unwrap();
        assert_eq!(final_stats.current_streak, 2);
        assert_eq!(final_stats.max_streak, 3);
        assert_eq!(final_stats.total_days, 7);
    }
}
