//! Trait interfaces for the Optionality Tracker.
//!
//! These traits define the contracts between crates:
//! - [`EventSource`]: ordered action/exposure retrieval (opt-node implements)
//! - [`SettingsStore`]: singleton settings persistence (opt-node implements)
//! - [`ReadinessModel`]: readiness scoring engine (opt-model implements)

use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::DECAY_WINDOW_DAYS;
use crate::error::OptError;
use crate::types::{Action, DateRange, EventSnapshot, Exposure, IncomePoint, IncomeSeries, Settings};

/// Read access to the recorded event streams.
///
/// Implementations return events whose timestamps fall in
/// `[from, to_exclusive)`. Ordering is not guaranteed; the computation
/// crates index events by day themselves.
pub trait EventSource: Send + Sync {
    fn actions_between(
        &self,
        from: NaiveDateTime,
        to_exclusive: NaiveDateTime,
    ) -> Result<Vec<Action>, OptError>;

    fn exposures_between(
        &self,
        from: NaiveDateTime,
        to_exclusive: NaiveDateTime,
    ) -> Result<Vec<Exposure>, OptError>;
}

/// Persistence for the singleton [`Settings`] record.
///
/// Validation is not the store's concern; see the node's settings provider.
pub trait SettingsStore: Send + Sync {
    /// The stored record, or `None` if it was never created.
    fn load_settings(&self) -> Result<Option<Settings>, OptError>;

    fn store_settings(&self, settings: &Settings) -> Result<(), OptError>;
}

/// Pure computation of daily readiness points.
///
/// Every point depends only on the events, the day, and the settings value,
/// so recomputation is idempotent and concurrent calls need no locking.
/// Implemented by the readiness engine (opt-model).
pub trait ReadinessModel: Send + Sync {
    /// Days before a range start whose events can influence its first point.
    ///
    /// Callers widen their event fetch by this many days.
    fn lookback_days(&self) -> usize {
        DECAY_WINDOW_DAYS - 1
    }

    /// Readiness point for a single day.
    fn point_for_day(
        &self,
        events: EventSnapshot<'_>,
        day: NaiveDate,
        settings: &Settings,
    ) -> IncomePoint;

    /// One point per day of `range`, chronologically ordered.
    ///
    /// Default implementation scores each day independently.
    fn series(
        &self,
        events: EventSnapshot<'_>,
        range: &DateRange,
        settings: &Settings,
    ) -> IncomeSeries {
        IncomeSeries {
            daily: range
                .days()
                .map(|day| self.point_for_day(events, day, settings))
                .collect(),
        }
    }
}
