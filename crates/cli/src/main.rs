//! Rollcall CLI - migrations and attendance operations from the shell.
//!
//! This binary is a thin adapter over the ledger service; it owns the
//! "what is today?" decision (UTC civil date unless `--date` is given) and
//! the terminal output, nothing else.
//!
//! # Usage
//!
//! ```bash
//! # Bring the schema up to date
//! rollcall migrate
//!
//! # Record a check-in for today (UTC)
//! rollcall check-in --user 352815616964754954
//!
//! # Personal stats and monthly attendance
//! rollcall stats --user 352815616964754954
//! rollcall monthly --user 352815616964754954 --year 2026 --month 2
//!
//! # Server-wide counts and leaderboards
//! rollcall server
//! rollcall leaderboard --metric max-streak --limit 10
//! rollcall rankings
//! ```
//!
//! # Environment Variables
//!
//! - `ROLLCALL_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use rollcall_ledger::{AttendanceService, LedgerConfig, db};

mod commands;

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(author, version, about = "Rollcall attendance ledger CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Record a check-in for a user
    CheckIn {
        /// User id to check in
        #[arg(short, long)]
        user: String,

        /// Civil date (YYYY-MM-DD); defaults to today in UTC
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show a user's attendance stats
    Stats {
        /// User id to look up
        #[arg(short, long)]
        user: String,
    },
    /// List a user's check-in dates for one calendar month
    Monthly {
        /// User id to look up
        #[arg(short, long)]
        user: String,

        /// Calendar year
        #[arg(short, long)]
        year: i32,

        /// Calendar month (1-12)
        #[arg(short, long)]
        month: u32,
    },
    /// Show server-wide attendance counts
    Server {
        /// As-of civil date (YYYY-MM-DD); defaults to today in UTC
        #[arg(short, long)]
        as_of: Option<NaiveDate>,
    },
    /// Show the top users for one metric
    Leaderboard {
        /// Metric: current-streak, max-streak, or total-days
        #[arg(short, long, default_value = "current-streak")]
        metric: String,

        /// How many entries to show
        #[arg(short, long, default_value_t = 5)]
        limit: u32,
    },
    /// Show all three leaderboards as one snapshot
    Rankings {
        /// How many entries per leaderboard
        #[arg(short, long, default_value_t = 5)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = LedgerConfig::from_env()?;
    let pool = db::connect_with_retry(&config).await?;
    let service = AttendanceService::new(pool);

    match cli.command {
        Commands::Migrate => commands::migrate::run(service.pool()).await?,
        Commands::CheckIn { user, date } => {
            commands::attendance::check_in(&service, &user, date.unwrap_or_else(today)).await?;
        }
        Commands::Stats { user } => commands::attendance::stats(&service, &user).await?,
        Commands::Monthly { user, year, month } => {
            commands::attendance::monthly(&service, &user, year, month).await?;
        }
        Commands::Server { as_of } => {
            commands::report::server(&service, as_of.unwrap_or_else(today)).await?;
        }
        Commands::Leaderboard { metric, limit } => {
            commands::report::leaderboard(&service, &metric, limit).await?;
        }
        Commands::Rankings { limit } => commands::report::rankings(&service, limit).await?,
    }
    Ok(())
}

/// The canonical civil date when none is supplied: today in UTC.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}
