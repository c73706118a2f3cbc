//! Rollcall Core - Shared types library.
//!
//! This crate provides common types used across all Rollcall components:
//! - `ledger` - Attendance ledger, streak engine, and reporting queries
//! - `cli` - Command-line adapter for migrations and attendance operations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no async.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - The validated [`UserId`] newtype, the [`UserStats`]
//!   aggregate, and the leaderboard [`Metric`] enum

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
