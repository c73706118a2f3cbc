//! Core types for Rollcall.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod metric;
pub mod stats;

pub use id::{UserId, UserIdError};
pub use metric::{Metric, MetricParseError};
pub use stats::UserStats;
