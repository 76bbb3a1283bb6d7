//! # opt-model: Decay-weighted readiness model.
//!
//! Converts raw action and exposure logs into a daily readiness score:
//! - **Decay window**: each day scans a fixed 60-day trailing window and weights
//!   every event by `0.5^(days_ago / half_life)`.
//! - **Saturation**: unbounded decayed accumulation is compressed into `[0, 1]`
//!   via `1 - e^(-k·x)`.
//! - **Scoring**: four capitals (skill, network, leads, energy) are blended with
//!   the configured weights; energy carries a variance-based stability penalty.
//! - **Cold start**: fewer than five active days flags the point low-data and
//!   replaces zero capitals with an uninformative midpoint.
//!
//! Everything here is pure and synchronous; no state survives a call.

pub mod engine;
pub mod saturation;
pub mod scorer;
pub mod window;

pub use engine::ReadinessEngine;
pub use saturation::saturate;
pub use window::{DayBuckets, DecayWindow, WindowAggregate};
