//! Rollcall Ledger - Attendance ledger and streak engine.
//!
//! This crate is the transactional core of Rollcall. It converts raw
//! "user X checked in on date D" events into durable state - current streak,
//! max streak, lifetime total, last attendance date - with
//! exactly-once-per-day semantics, and serves the reporting queries layered
//! on that state (monthly attendance sets, server-wide counts, leaderboards).
//!
//! # Architecture
//!
//! - [`db`] - `PostgreSQL` storage: connection pool, migrations, and the
//!   [`db::AttendanceRepository`] with its single transactional write path
//! - [`streak`] - the pure streak-advancement decision, kept free of I/O so
//!   it can be tested exhaustively
//! - [`service`] - the [`AttendanceService`] facade consumed by adapters;
//!   validates input before any storage access
//! - [`config`] - environment-driven configuration with a bounded
//!   retry-on-connect policy
//!
//! Callers exchange civil dates (`chrono::NaiveDate`), never instants.
//! Converting a user's local "now" to the canonical civil date is the
//! caller's job.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;
pub mod service;
pub mod streak;

pub use config::{ConfigError, LedgerConfig};
pub use db::{AttendanceRepository, RepositoryError};
pub use models::{CheckInOutcome, LeaderboardEntry, Rankings, ServerStats};
pub use service::{AttendanceError, AttendanceService};
