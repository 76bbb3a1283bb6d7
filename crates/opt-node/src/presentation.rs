//! Output rounding for API responses.
//!
//! The computation crates return full-precision values; rounding happens
//! once, here, on the way out.

use opt_core::constants::{SCORE_DECIMALS, UNIT_DECIMALS};
use opt_core::math::round_to;
use opt_core::types::{AnalyticsSummary, Capitals, IncomePoint};

fn unit(v: f64) -> f64 {
    round_to(v, UNIT_DECIMALS)
}

fn score(v: f64) -> f64 {
    round_to(v, SCORE_DECIMALS)
}

fn capitals(c: Capitals) -> Capitals {
    c.map(unit)
}

/// Capitals and confidence to 4 decimals, readiness to 2.
pub fn present_point(point: IncomePoint) -> IncomePoint {
    IncomePoint {
        capitals: capitals(point.capitals),
        readiness: score(point.readiness),
        confidence: unit(point.confidence),
        ..point
    }
}

/// Averages and readiness to 2 decimals, capitals and confidence to 4.
pub fn present_summary(mut summary: AnalyticsSummary) -> AnalyticsSummary {
    for p in &mut summary.daily {
        p.irreversibility_avg = score(p.irreversibility_avg);
    }
    let t = &mut summary.totals;
    t.avg_o_delta = score(t.avg_o_delta);
    t.readiness_latest = score(t.readiness_latest);
    t.capitals_latest = capitals(t.capitals_latest);
    t.confidence_latest = unit(t.confidence_latest);
    summary
}
