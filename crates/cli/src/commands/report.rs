//! Server-wide reporting commands: counts and leaderboards.

use chrono::NaiveDate;

use rollcall_core::Metric;
use rollcall_ledger::{AttendanceService, LeaderboardEntry};

/// Print server-wide counts for one civil date.
///
/// # Errors
///
/// Returns an error on storage failure.
pub async fn server(
    service: &AttendanceService,
    as_of: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = service.server_stats(as_of).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("server stats as of {as_of}");
        println!("  checked in today: {}", stats.today_count);
        println!("  registered users: {}", stats.total_users);
    }
    Ok(())
}

/// Print the top users for one metric.
///
/// # Errors
///
/// Returns an error if the metric name is unknown or storage fails.
pub async fn leaderboard(
    service: &AttendanceService,
    metric: &str,
    limit: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let metric: Metric = metric.parse()?;
    let entries = service.leaderboard(metric, limit).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("top {limit} by {metric}");
        print_entries(&entries);
    }
    Ok(())
}

/// Print all three leaderboards from one snapshot.
///
/// # Errors
///
/// Returns an error on storage failure.
pub async fn rankings(
    service: &AttendanceService,
    limit: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let rankings = service.rankings(limit).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("top {limit} by {}", Metric::CurrentStreak);
        print_entries(&rankings.current_streak);
        println!("top {limit} by {}", Metric::MaxStreak);
        print_entries(&rankings.max_streak);
        println!("top {limit} by {}", Metric::TotalDays);
        print_entries(&rankings.total_days);
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_entries(entries: &[LeaderboardEntry]) {
    if entries.is_empty() {
        println!("  (no users yet)");
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("  {}. {}: {}", i + 1, entry.user_id, entry.value);
    }
}
