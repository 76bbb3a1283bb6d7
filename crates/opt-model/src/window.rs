//! Decay-weighted event window.
//!
//! Events are first grouped into [`DayBuckets`], one bucket per calendar day
//! of the horizon (query range plus lookback), indexed by day offset. Each
//! scored day then walks back over its trailing window of buckets, applying a
//! precomputed decay weight per day distance. Events that share a day share a
//! weight, so per-day sums are exact substitutes for per-event pairs.

use chrono::NaiveDate;

use opt_core::calendar::shift_back;
use opt_core::category::{classify, Category};
use opt_core::math::{clamp01, decay_factor, WeightedMean};
use opt_core::types::{Action, DateRange, EventSnapshot};

/// Skill contribution of an action: `clamp01((max(0, h) + max(0, e)) / 4)`.
pub fn skill_contribution(action: &Action) -> f64 {
    clamp01((action.h.max(0) as f64 + action.e.max(0) as f64) / 4.0)
}

/// Energy signal of an action: `clamp01((e + 2) / 4)`.
pub fn energy_signal(action: &Action) -> f64 {
    clamp01((action.e as f64 + 2.0) / 4.0)
}

/// Per-day sums of every signal the window consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DayBucket {
    pub actions: usize,
    pub skill_sum: f64,
    pub energy_sum: f64,
    pub exposures: usize,
    pub network: usize,
    pub lead: usize,
}

impl DayBucket {
    /// Whether at least one action or exposure occurred on this day.
    pub fn is_active(&self) -> bool {
        self.actions > 0 || self.exposures > 0
    }

    /// Mean energy signal of the day's actions, if any.
    pub fn energy_mean(&self) -> Option<f64> {
        (self.actions > 0).then(|| self.energy_sum / self.actions as f64)
    }
}

/// Events grouped by day offset across a horizon.
#[derive(Debug, Clone)]
pub struct DayBuckets {
    horizon: DateRange,
    buckets: Vec<DayBucket>,
}

impl DayBuckets {
    /// Group `events` by day. Events outside `horizon` are ignored.
    pub fn build(events: EventSnapshot<'_>, horizon: DateRange) -> Self {
        let mut buckets = vec![DayBucket::default(); horizon.len()];

        for action in events.actions {
            let Some(offset) = horizon.offset_of(action.day()) else {
                continue;
            };
            let bucket = &mut buckets[offset];
            bucket.actions += 1;
            bucket.skill_sum += skill_contribution(action);
            bucket.energy_sum += energy_signal(action);
        }

        for exposure in events.exposures {
            let Some(offset) = horizon.offset_of(exposure.day()) else {
                continue;
            };
            let bucket = &mut buckets[offset];
            bucket.exposures += 1;
            let tags = classify(&exposure.kind);
            if tags.contains(Category::Network) {
                bucket.network += 1;
            }
            if tags.contains(Category::Lead) {
                bucket.lead += 1;
            }
        }

        Self { horizon, buckets }
    }

    pub fn horizon(&self) -> &DateRange {
        &self.horizon
    }

    /// Bucket for `day`, or `None` outside the horizon.
    pub fn get(&self, day: NaiveDate) -> Option<&DayBucket> {
        self.horizon.offset_of(day).map(|i| &self.buckets[i])
    }
}

/// Raw decayed aggregates for one scored day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowAggregate {
    /// Decay-weighted mean of action skill contributions.
    pub skill_weighted_mean: f64,
    /// Decay-weighted mean of action energy signals.
    pub energy_weighted_mean: f64,
    /// Unweighted mean energy signal per distinct action day.
    pub daily_energy_means: Vec<f64>,
    /// Sum of decay weights of network-tagged exposures.
    pub network_raw: f64,
    /// Sum of decay weights of lead-tagged exposures.
    pub lead_raw: f64,
    /// Distinct days in the window with at least one event.
    pub active_days: usize,
}

/// Fixed-length trailing window with a precomputed decay table.
#[derive(Debug, Clone)]
pub struct DecayWindow {
    /// `weights[k]` is the decay weight for an event `k` days before the scored day.
    weights: Vec<f64>,
}

impl DecayWindow {
    /// A window of `window_days` days (at least one) decaying with `half_life_days`.
    pub fn new(window_days: usize, half_life_days: u32) -> Self {
        let weights = (0..window_days.max(1) as u32)
            .map(|days_ago| decay_factor(days_ago, half_life_days))
            .collect();
        Self { weights }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Decay weight for an event `days_ago` days before the scored day.
    pub fn weight(&self, days_ago: usize) -> Option<f64> {
        self.weights.get(days_ago).copied()
    }

    /// Horizon needed to score every day of `range` with full windows.
    pub fn horizon_for(&self, range: &DateRange) -> DateRange {
        range.extend_back(self.len() - 1)
    }

    /// Aggregate the window ending at `day` inclusive.
    ///
    /// Window days outside the buckets' horizon contribute nothing.
    pub fn aggregate(&self, buckets: &DayBuckets, day: NaiveDate) -> WindowAggregate {
        let mut skill = WeightedMean::default();
        let mut energy = WeightedMean::default();
        let mut agg = WindowAggregate::default();

        for (days_ago, &weight) in self.weights.iter().enumerate() {
            let date = shift_back(day, days_ago as u64);
            let Some(bucket) = buckets.get(date) else {
                continue;
            };
            if !bucket.is_active() {
                continue;
            }
            agg.active_days += 1;

            skill.push_group(bucket.skill_sum, bucket.actions, weight);
            energy.push_group(bucket.energy_sum, bucket.actions, weight);
            if let Some(mean) = bucket.energy_mean() {
                agg.daily_energy_means.push(mean);
            }

            agg.network_raw += bucket.network as f64 * weight;
            agg.lead_raw += bucket.lead as f64 * weight;
        }

        agg.skill_weighted_mean = skill.value();
        agg.energy_weighted_mean = energy.value();
        agg
    }
}
