//! Numeric primitives shared by the readiness model and the analytics engine.
//!
//! Every function is total: empty inputs and zero denominators yield `0.0`
//! instead of `NaN`. Rounding lives here too, but is only ever applied as a
//! final presentation step.

/// Clamp a value into `[0, 1]`. `NaN` maps to `0.0`.
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Exponential recency weight `0.5^(days_ago / half_life)`.
///
/// A half-life of zero is treated as one day.
pub fn decay_factor(days_ago: u32, half_life_days: u32) -> f64 {
    let half_life = half_life_days.max(1) as f64;
    0.5_f64.powf(days_ago as f64 / half_life)
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance, `0.0` when fewer than two samples exist.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Running decay-weighted mean, `Σ value·weight / Σ weight`.
///
/// [`push_group`](Self::push_group) adds several samples sharing one weight,
/// which is how same-day events accumulate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedMean {
    numerator: f64,
    denominator: f64,
}

impl WeightedMean {
    pub fn push(&mut self, value: f64, weight: f64) {
        self.numerator += value * weight;
        self.denominator += weight;
    }

    /// Add `count` samples whose values sum to `value_sum`, all at `weight`.
    pub fn push_group(&mut self, value_sum: f64, count: usize, weight: f64) {
        if count == 0 {
            return;
        }
        self.numerator += value_sum * weight;
        self.denominator += count as f64 * weight;
    }

    pub fn value(&self) -> f64 {
        if self.denominator == 0.0 {
            0.0
        } else {
            self.numerator / self.denominator
        }
    }
}

/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10_f64.powi(places as i32);
    (value * scale).round() / scale
}
