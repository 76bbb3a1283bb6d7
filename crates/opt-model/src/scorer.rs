//! Saturation and composite scoring.
//!
//! Turns a [`WindowAggregate`] into normalized capitals, a confidence value,
//! and the blended readiness score, including the low-data fallback.

use chrono::NaiveDate;

use opt_core::constants::{
    CONFIDENCE_FULL_DAYS, ENERGY_PENALTY_WEIGHT, ENERGY_VARIANCE_SCALE, LEAD_SATURATION_K,
    LOW_DATA_FALLBACK, LOW_DATA_MIN_DAYS, NETWORK_SATURATION_K, SKILL_SATURATION_K,
};
use opt_core::math::{clamp01, population_variance};
use opt_core::types::{Capitals, IncomePoint, Settings};

use crate::saturation::saturate;
use crate::window::WindowAggregate;

/// Stability penalty in `[0, 1]` from the spread of daily energy means.
///
/// Zero with fewer than two distinct action days.
pub fn stability_penalty(daily_energy_means: &[f64]) -> f64 {
    clamp01(population_variance(daily_energy_means) / ENERGY_VARIANCE_SCALE)
}

/// Raw capitals before the low-data fallback.
pub fn capitals(agg: &WindowAggregate) -> Capitals {
    let penalty = stability_penalty(&agg.daily_energy_means);
    Capitals {
        s: saturate(agg.skill_weighted_mean, SKILL_SATURATION_K),
        n: saturate(agg.network_raw, NETWORK_SATURATION_K),
        l: saturate(agg.lead_raw, LEAD_SATURATION_K),
        e: clamp01(agg.energy_weighted_mean * (1.0 - ENERGY_PENALTY_WEIGHT * penalty)),
    }
}

/// `ln(1 + days) / ln(1 + 30)`, clamped to `[0, 1]`.
pub fn confidence(active_days: usize) -> f64 {
    clamp01((1.0 + active_days as f64).ln() / (1.0 + CONFIDENCE_FULL_DAYS as f64).ln())
}

pub fn is_low_data(active_days: usize) -> bool {
    active_days < LOW_DATA_MIN_DAYS
}

/// Replace every zero capital with the uninformative midpoint.
pub fn low_data_fallback(c: Capitals) -> Capitals {
    c.map(|v| if v > 0.0 { v } else { LOW_DATA_FALLBACK })
}

/// Composite readiness `100 · clamp01(Σ w·capital)`.
pub fn readiness(capitals: &Capitals, settings: &Settings) -> f64 {
    100.0 * clamp01(capitals.blend(settings))
}

/// Score one day's aggregate.
pub fn score(agg: &WindowAggregate, date: NaiveDate, settings: &Settings) -> IncomePoint {
    let low_data = is_low_data(agg.active_days);
    let mut caps = capitals(agg);
    if low_data {
        caps = low_data_fallback(caps);
    }

    IncomePoint {
        date,
        readiness: readiness(&caps, settings),
        capitals: caps,
        confidence: confidence(agg.active_days),
        low_data_confidence: low_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn settings() -> Settings {
        Settings::defaults(Utc::now())
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    // --- stability ---

    #[test]
    fn penalty_zero_for_single_day() {
        assert_eq!(stability_penalty(&[]), 0.0);
        assert_eq!(stability_penalty(&[0.9]), 0.0);
    }

    #[test]
    fn penalty_scales_with_variance() {
        // variance 0.01 / 0.05 = 0.2
        let p = stability_penalty(&[0.4, 0.6]);
        assert!((p - 0.2).abs() < 1e-12);
        // variance 0.25 saturates
        assert_eq!(stability_penalty(&[0.0, 1.0]), 1.0);
    }

    #[test]
    fn energy_halved_at_full_penalty() {
        let agg = WindowAggregate {
            energy_weighted_mean: 0.5,
            daily_energy_means: vec![0.0, 1.0],
            active_days: 2,
            ..Default::default()
        };
        assert!((capitals(&agg).e - 0.25).abs() < 1e-12);
    }

    // --- confidence ---

    #[test]
    fn confidence_curve() {
        assert_eq!(confidence(0), 0.0);
        assert_eq!(confidence(30), 1.0);
        assert_eq!(confidence(60), 1.0);
        let c5 = confidence(5);
        assert!((c5 - 6f64.ln() / 31f64.ln()).abs() < 1e-12);
        assert!(confidence(4) < c5 && c5 < confidence(6));
    }

    // --- low-data ---

    #[test]
    fn low_data_threshold() {
        assert!(is_low_data(0));
        assert!(is_low_data(4));
        assert!(!is_low_data(5));
    }

    #[test]
    fn fallback_only_replaces_zeros() {
        let c = low_data_fallback(Capitals { s: 0.0, n: 0.2, l: 0.0, e: 0.9 });
        assert_eq!(c, Capitals { s: 0.5, n: 0.2, l: 0.5, e: 0.9 });
    }

    #[test]
    fn empty_aggregate_scores_midpoint() {
        let p = score(&WindowAggregate::default(), day(), &settings());
        assert!(p.low_data_confidence);
        assert_eq!(p.confidence, 0.0);
        assert_eq!(p.capitals, Capitals { s: 0.5, n: 0.5, l: 0.5, e: 0.5 });
        assert!((p.readiness - 50.0).abs() < 1e-9);
    }

    #[test]
    fn enough_days_keeps_zero_capitals() {
        let agg = WindowAggregate {
            active_days: 5,
            ..Default::default()
        };
        let p = score(&agg, day(), &settings());
        assert!(!p.low_data_confidence);
        assert_eq!(p.capitals, Capitals::default());
        assert_eq!(p.readiness, 0.0);
    }

    // --- readiness ---

    #[test]
    fn readiness_follows_weights() {
        let mut s = settings();
        s.w_s = 0.0;
        s.w_n = 0.0;
        s.w_l = 0.0;
        s.w_e = 1.0;
        let c = Capitals { s: 1.0, n: 1.0, l: 1.0, e: 0.3 };
        assert!((readiness(&c, &s) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn readiness_clamped_to_hundred() {
        let mut s = settings();
        s.w_s = 1.0;
        s.w_n = 1.0;
        let c = Capitals { s: 1.0, n: 1.0, l: 1.0, e: 1.0 };
        assert_eq!(readiness(&c, &s), 100.0);
    }
}
