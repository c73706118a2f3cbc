//! Per-user attendance commands: check-in, stats, monthly listing.

use chrono::NaiveDate;

use rollcall_ledger::{AttendanceError, AttendanceService};

/// Record a check-in and print the resulting stats.
///
/// # Errors
///
/// Returns `AttendanceError` on invalid input or storage failure.
pub async fn check_in(
    service: &AttendanceService,
    user: &str,
    date: NaiveDate,
) -> Result<(), AttendanceError> {
    let outcome = service.check_in(user, date).await?;

    #[allow(clippy::print_stdout)]
    {
        if outcome.accepted {
            println!("check-in recorded for {user} on {date}");
        } else {
            println!("{user} already checked in on {date}");
        }
        let s = &outcome.stats;
        println!(
            "  current streak: {}  max streak: {}  total days: {}",
            s.current_streak, s.max_streak, s.total_days
        );
    }
    Ok(())
}

/// Print a user's aggregate stats.
///
/// # Errors
///
/// Returns `AttendanceError` on invalid input or storage failure.
pub async fn stats(service: &AttendanceService, user: &str) -> Result<(), AttendanceError> {
    let stats = service.stats(user).await?;

    #[allow(clippy::print_stdout)]
    {
        match stats {
            Some(s) => {
                println!("stats for {user}");
                println!("  current streak: {}", s.current_streak);
                println!("  max streak:     {}", s.max_streak);
                println!("  total days:     {}", s.total_days);
                match s.last_attendance_date {
                    Some(d) => println!("  last check-in:  {d}"),
                    None => println!("  last check-in:  -"),
                }
            }
            None => println!("no attendance history for {user}"),
        }
    }
    Ok(())
}

/// Print a user's check-in dates for one calendar month.
///
/// # Errors
///
/// Returns `AttendanceError` on invalid input or storage failure.
pub async fn monthly(
    service: &AttendanceService,
    user: &str,
    year: i32,
    month: u32,
) -> Result<(), AttendanceError> {
    let days = service.monthly_days(user, year, month).await?;

    #[allow(clippy::print_stdout)]
    {
        if days.is_empty() {
            println!("no check-ins for {user} in {year}-{month:02}");
        } else {
            println!("{} check-ins for {user} in {year}-{month:02}:", days.len());
            for day in days {
                println!("  {day}");
            }
        }
    }
    Ok(())
}
