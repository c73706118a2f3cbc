//! Leaderboard metric selection.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Metric`] from a string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown metric '{0}' (expected current-streak, max-streak, or total-days)")]
pub struct MetricParseError(String);

/// The aggregate column a leaderboard is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Rank by the current consecutive-day streak.
    CurrentStreak,
    /// Rank by the longest streak ever reached.
    MaxStreak,
    /// Rank by lifetime check-in days.
    TotalDays,
}

impl Metric {
    /// The `user_stats` column holding this metric.
    ///
    /// Always one of a fixed set of identifiers, so it is safe to splice
    /// into a SQL statement.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::CurrentStreak => "current_streak",
            Self::MaxStreak => "max_streak",
            Self::TotalDays => "total_days",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CurrentStreak => "current-streak",
            Self::MaxStreak => "max-streak",
            Self::TotalDays => "total-days",
        })
    }
}

impl FromStr for Metric {
    type Err = MetricParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current-streak" | "current_streak" => Ok(Self::CurrentStreak),
            "max-streak" | "max_streak" => Ok(Self::MaxStreak),
            "total-days" | "total_days" => Ok(Self::TotalDays),
            other => Err(MetricParseError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names() {
        assert_eq!(Metric::CurrentStreak.column(), "current_streak");
        assert_eq!(Metric::MaxStreak.column(), "max_streak");
        assert_eq!(Metric::TotalDays.column(), "total_days");
    }

    #[test]
    fn test_from_str_round_trip() {
        for metric in [Metric::CurrentStreak, Metric::MaxStreak, Metric::TotalDays] {
            let parsed: Metric = metric.to_string().parse().unwrap();
            assert_eq!(parsed, metric);
        }
    }

    #[test]
    fn test_from_str_snake_case() {
        assert_eq!("total_days".parse::<Metric>().unwrap(), Metric::TotalDays);
    }

    #[test]
    fn test_from_str_unknown() {
        assert!("streakiness".parse::<Metric>().is_err());
    }
}
