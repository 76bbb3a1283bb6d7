//! Per-day rolling statistics: delta sums, cumulative totals, constraint
//! debt, and irreversibility.

use opt_core::types::{Action, DailyAnalyticsPoint, DateRange};

/// Per-day accumulators, indexed by offset from the horizon start.
#[derive(Debug, Clone, Copy, Default)]
struct DayTally {
    o_delta_sum: i64,
    negative_sum: i64,
    irreversibility_sum: f64,
    actions: usize,
}

impl DayTally {
    fn add(&mut self, action: &Action) {
        let delta = action.o_delta() as i64;
        self.o_delta_sum += delta;
        self.negative_sum += delta.min(0);
        self.irreversibility_sum += irreversibility(action);
        self.actions += 1;
    }

    fn irreversibility_avg(&self) -> f64 {
        if self.actions == 0 {
            0.0
        } else {
            self.irreversibility_sum / self.actions as f64
        }
    }
}

/// Irreversibility cost of an action: `2 - r`, between 0 and
/// [`IRREVERSIBILITY_MAX`](opt_core::constants::IRREVERSIBILITY_MAX).
pub fn irreversibility(action: &Action) -> f64 {
    2.0 - action.r as f64
}

/// One analytics point per day of `range`.
///
/// `constraint_debt_7d` sums `min(0, o_delta)` over the trailing
/// `debt_window_days` days. Actions on look-back days before the range count
/// toward debt only; days without data contribute nothing.
pub fn daily_points(
    actions: &[Action],
    range: &DateRange,
    debt_window_days: usize,
) -> Vec<DailyAnalyticsPoint> {
    let window = debt_window_days.max(1);
    let horizon = range.extend_back(window - 1);
    // Look-back days actually available before the range start.
    let skip = horizon.len() - range.len();

    let mut tallies = vec![DayTally::default(); horizon.len()];
    for action in actions {
        if let Some(offset) = horizon.offset_of(action.day()) {
            tallies[offset].add(action);
        }
    }

    let mut points = Vec::with_capacity(range.len());
    let mut cumulative = 0i64;
    let mut debt = 0i64;

    for (offset, tally) in tallies.iter().enumerate() {
        debt += tally.negative_sum;
        if offset >= window {
            debt -= tallies[offset - window].negative_sum;
        }
        if offset < skip {
            continue;
        }

        cumulative += tally.o_delta_sum;
        points.push(DailyAnalyticsPoint {
            date: horizon.date_at(offset),
            o_delta_sum: tally.o_delta_sum,
            cumulative,
            constraint_debt_7d: debt,
            irreversibility_avg: tally.irreversibility_avg(),
        });
    }

    points
}
