//! Monday-aligned weekly exposure counts.

use opt_core::calendar::{days_between, shift_forward, week_start};
use opt_core::types::{DateRange, Exposure, WeeklyExposurePoint};

/// Exposure counts per ISO week, for every week overlapping `range`.
///
/// Weeks are indexed by offset from the Monday of the range's first week, so
/// output order is chronological. A week whose span overlaps the range counts
/// every supplied exposure inside it, including days outside the range. Weeks
/// without exposures are omitted.
pub fn weekly_exposure(exposures: &[Exposure], range: &DateRange) -> Vec<WeeklyExposurePoint> {
    let first = week_start(range.start());
    let last = week_start(range.end());
    let weeks = (days_between(first, last) / 7) as usize + 1;

    let mut counts = vec![0u64; weeks];
    for exposure in exposures {
        let offset = days_between(first, week_start(exposure.day()));
        if offset < 0 {
            continue;
        }
        if let Some(count) = counts.get_mut((offset / 7) as usize) {
            *count += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .filter(|&(_, count)| count > 0)
        .map(|(i, count)| WeeklyExposurePoint {
            week_start: shift_forward(first, i as u64 * 7),
            count,
        })
        .collect()
}
