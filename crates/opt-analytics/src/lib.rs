//! # opt-analytics: Rolling analytics engine.
//!
//! Walks the action and exposure streams over a query range and produces:
//! - per-day optionality delta sums and their running cumulative total
//! - a trailing 7-day constraint debt (sum of negative deltas)
//! - a per-day irreversibility average
//! - Monday-aligned weekly exposure counts
//! - period totals, carrying through the latest readiness point
//!
//! Unlike the readiness model there is no 60-day lookback: results depend only
//! on events inside the range plus the debt window's short look-back.

pub mod rolling;
pub mod summary;
pub mod weekly;

pub use rolling::daily_points;
pub use summary::RollingEngine;
pub use weekly::weekly_exposure;
