//! Period totals and the [`RollingEngine`] entry point.

use tracing::debug;

use opt_core::constants::DEBT_WINDOW_DAYS;
use opt_core::types::{
    AnalyticsSummary, AnalyticsTotals, Capitals, DailyAnalyticsPoint, DateRange, EventSnapshot,
    IncomePoint, WeeklyExposurePoint,
};

use crate::rolling::daily_points;
use crate::weekly::weekly_exposure;

/// Period totals from the daily and weekly sequences.
///
/// `latest` is the readiness model's current point for the same range; when
/// absent the readiness fields stay zero.
pub fn totals(
    daily: &[DailyAnalyticsPoint],
    weekly: &[WeeklyExposurePoint],
    latest: Option<&IncomePoint>,
) -> AnalyticsTotals {
    let sum_o_delta: i64 = daily.iter().map(|p| p.o_delta_sum).sum();
    let avg_o_delta = if daily.is_empty() {
        0.0
    } else {
        sum_o_delta as f64 / daily.len() as f64
    };

    AnalyticsTotals {
        sum_o_delta,
        avg_o_delta,
        constraint_debt_7d_last: daily.last().map_or(0, |p| p.constraint_debt_7d),
        exposure_count_period: weekly.iter().map(|w| w.count).sum(),
        readiness_latest: latest.map_or(0.0, |p| p.readiness),
        capitals_latest: latest.map_or_else(Capitals::default, |p| p.capitals),
        confidence_latest: latest.map_or(0.0, |p| p.confidence),
    }
}

/// Rolling analytics over a query range.
#[derive(Debug, Clone)]
pub struct RollingEngine {
    debt_window_days: usize,
}

impl Default for RollingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingEngine {
    pub fn new() -> Self {
        Self {
            debt_window_days: DEBT_WINDOW_DAYS,
        }
    }

    pub fn with_debt_window_days(days: usize) -> Self {
        Self {
            debt_window_days: days.max(1),
        }
    }

    pub fn debt_window_days(&self) -> usize {
        self.debt_window_days
    }

    /// Compute the full summary. Never fails: empty inputs yield zeroed
    /// points for every day and no weekly buckets.
    pub fn summarize(
        &self,
        events: EventSnapshot<'_>,
        range: &DateRange,
        latest: Option<&IncomePoint>,
    ) -> AnalyticsSummary {
        let daily = daily_points(events.actions, range, self.debt_window_days);
        let weekly = weekly_exposure(events.exposures, range);
        let totals = totals(&daily, &weekly, latest);

        debug!(
            start = %range.start(),
            end = %range.end(),
            days = daily.len(),
            weeks = weekly.len(),
            sum_o_delta = totals.sum_o_delta,
            "computed analytics summary"
        );

        AnalyticsSummary {
            totals,
            daily,
            weekly_exposure: weekly,
        }
    }
}
