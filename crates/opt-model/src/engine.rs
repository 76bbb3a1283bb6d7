//! Readiness engine implementing the [`ReadinessModel`] trait.
//!
//! Buckets the event snapshot once per call, precomputes the decay table for
//! the configured half-life, then scores every day of the range independently.

use chrono::NaiveDate;
use tracing::debug;

use opt_core::constants::DECAY_WINDOW_DAYS;
use opt_core::traits::ReadinessModel;
use opt_core::types::{DateRange, EventSnapshot, IncomePoint, IncomeSeries, Settings};

use crate::scorer;
use crate::window::{DayBuckets, DecayWindow};

/// The production readiness model.
///
/// Implements [`ReadinessModel`] with:
/// - A fixed-length trailing decay window (60 days by default)
/// - Exponential saturation of skill, network, and leads
/// - Variance-penalized energy and the low-data fallback
#[derive(Debug, Clone)]
pub struct ReadinessEngine {
    window_days: usize,
}

impl Default for ReadinessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessEngine {
    /// Create an engine with the standard 60-day window.
    pub fn new() -> Self {
        Self {
            window_days: DECAY_WINDOW_DAYS,
        }
    }

    /// Create an engine with a custom window length (at least one day).
    pub fn with_window_days(window_days: usize) -> Self {
        Self {
            window_days: window_days.max(1),
        }
    }

    pub fn window_days(&self) -> usize {
        self.window_days
    }
}

impl ReadinessModel for ReadinessEngine {
    fn lookback_days(&self) -> usize {
        self.window_days - 1
    }

    fn point_for_day(
        &self,
        events: EventSnapshot<'_>,
        day: NaiveDate,
        settings: &Settings,
    ) -> IncomePoint {
        let window = DecayWindow::new(self.window_days, settings.effective_half_life());
        let buckets = DayBuckets::build(events, window.horizon_for(&DateRange::single(day)));
        scorer::score(&window.aggregate(&buckets, day), day, settings)
    }

    fn series(
        &self,
        events: EventSnapshot<'_>,
        range: &DateRange,
        settings: &Settings,
    ) -> IncomeSeries {
        let window = DecayWindow::new(self.window_days, settings.effective_half_life());
        let buckets = DayBuckets::build(events, window.horizon_for(range));

        let daily: Vec<IncomePoint> = range
            .days()
            .map(|day| scorer::score(&window.aggregate(&buckets, day), day, settings))
            .collect();

        debug!(
            start = %range.start(),
            end = %range.end(),
            days = daily.len(),
            actions = events.actions.len(),
            exposures = events.exposures.len(),
            half_life = settings.effective_half_life(),
            "computed readiness series"
        );

        IncomeSeries { daily }
    }
}
