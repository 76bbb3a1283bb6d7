//! Query composition: range resolution, event fetch, and presentation.
//!
//! [`QueryService`] is the only place that knows how far back to fetch for a
//! range and when to round. It reads an immutable event snapshot and the
//! current settings, hands them to the pure computation crates, and shapes
//! the result for the API.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use opt_analytics::RollingEngine;
use opt_core::calendar::{midnight, shift_back, shift_forward};
use opt_core::category::Category;
use opt_core::constants::{DEFAULT_RANGE_DAYS, MAX_RANGE_DAYS};
use opt_core::error::{OptError, ValidationError};
use opt_core::traits::{EventSource, ReadinessModel, SettingsStore};
use opt_core::types::{
    AnalyticsSummary, DateRange, EventSnapshot, IncomePoint, IncomeSeries, Settings,
};
use opt_model::ReadinessEngine;

use crate::presentation::{present_point, present_summary};
use crate::settings::SettingsProvider;

/// Readiness series as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSeriesResponse {
    pub daily: Vec<IncomePoint>,
    pub current: Option<IncomePoint>,
    pub settings: Settings,
    pub explanations: Vec<String>,
}

/// One line per capital describing where it comes from.
pub fn explanations() -> Vec<String> {
    vec![
        "S uses decayed positive H and E from actions, then saturation.".to_string(),
        format!(
            "N uses decayed network-oriented exposures: {}.",
            Category::Network.members().join("/")
        ),
        format!(
            "L uses decayed lead-oriented exposures: {}.",
            Category::Lead.members().join("/")
        ),
        "E uses decayed E score signal with variance penalty for stability.".to_string(),
    ]
}

pub struct QueryService<E, S, M = ReadinessEngine> {
    events: Arc<E>,
    settings: SettingsProvider<S>,
    model: M,
    analytics: RollingEngine,
    default_range_days: u32,
}

impl<E, S, M> QueryService<E, S, M>
where
    E: EventSource,
    S: SettingsStore,
    M: ReadinessModel,
{
    pub fn new(events: Arc<E>, settings: SettingsProvider<S>, model: M) -> Self {
        Self {
            events,
            settings,
            model,
            analytics: RollingEngine::new(),
            default_range_days: DEFAULT_RANGE_DAYS,
        }
    }

    /// Length of the range used when a query names no start date.
    pub fn with_default_range_days(mut self, days: u32) -> Self {
        self.default_range_days = days.max(1);
        self
    }

    pub fn settings(&self) -> &SettingsProvider<S> {
        &self.settings
    }

    /// Fill in missing bounds: `end` defaults to `today`, `start` to the
    /// default range length ending at `end`. Ranges longer than
    /// [`MAX_RANGE_DAYS`] are rejected.
    pub fn resolve_range(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<DateRange, OptError> {
        let end = end.unwrap_or(today);
        let start =
            start.unwrap_or_else(|| shift_back(end, u64::from(self.default_range_days) - 1));
        let range = DateRange::new(start, end)?;
        if range.len() > MAX_RANGE_DAYS {
            return Err(ValidationError::RangeTooLong {
                days: range.len(),
                max: MAX_RANGE_DAYS,
            }
            .into());
        }
        Ok(range)
    }

    /// Readiness series for `range`, rounded for presentation.
    pub fn income_series(&self, range: &DateRange) -> Result<IncomeSeriesResponse, OptError> {
        let settings = self.settings.current()?;
        let series = self.readiness(range, &settings)?;
        let daily: Vec<IncomePoint> = series.daily.into_iter().map(present_point).collect();
        Ok(IncomeSeriesResponse {
            current: daily.last().copied(),
            daily,
            settings,
            explanations: explanations(),
        })
    }

    /// Rolling analytics for `range`, rounded for presentation.
    ///
    /// The rolling engine sees only events inside the range. The readiness
    /// fields come from the same lookback-backed series as
    /// [`income_series`](Self::income_series).
    pub fn analytics_summary(&self, range: &DateRange) -> Result<AnalyticsSummary, OptError> {
        let settings = self.settings.current()?;
        let from = midnight(range.start());
        let to = midnight(shift_forward(range.end(), 1));
        let actions = self.events.actions_between(from, to)?;
        let exposures = self.events.exposures_between(from, to)?;

        let series = self.readiness(range, &settings)?;
        let summary = self.analytics.summarize(
            EventSnapshot::new(&actions, &exposures),
            range,
            series.current(),
        );
        Ok(present_summary(summary))
    }

    /// Full-precision series, fetching enough history for the first day's
    /// decay window.
    fn readiness(&self, range: &DateRange, settings: &Settings) -> Result<IncomeSeries, OptError> {
        let from = midnight(shift_back(range.start(), self.model.lookback_days() as u64));
        let to = midnight(shift_forward(range.end(), 1));
        let actions = self.events.actions_between(from, to)?;
        let exposures = self.events.exposures_between(from, to)?;
        debug!(
            %from,
            %to,
            actions = actions.len(),
            exposures = exposures.len(),
            "fetched events for readiness"
        );
        Ok(self
            .model
            .series(EventSnapshot::new(&actions, &exposures), range, settings))
    }
}
