//! Criterion benchmarks for opt-model critical operations.
//!
//! Covers: saturation, window aggregation, and full-series scoring.

use chrono::{NaiveDate, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use opt_core::calendar::shift_back;
use opt_core::traits::ReadinessModel;
use opt_core::types::{Action, DateRange, Domain, EventSnapshot, Exposure, Settings};
use opt_model::engine::ReadinessEngine;
use opt_model::saturation::saturate;
use opt_model::window::{DayBuckets, DecayWindow};

const EXPOSURE_TYPES: [&str; 7] = [
    "application",
    "outreach",
    "post",
    "proposal",
    "interview",
    "portfolio_update",
    "coffee",
];

fn end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

/// One year of synthetic events, a few per day.
fn synthetic_events() -> (Vec<Action>, Vec<Exposure>) {
    let mut rng = StdRng::seed_from_u64(7);
    let end = end_date();
    let actions = (0..1_200u64)
        .map(|i| Action {
            id: i,
            occurred_at: shift_back(end, rng.gen_range(0..365)).and_hms_opt(12, 0, 0).unwrap(),
            domain: Domain::Income,
            title: format!("action {i}"),
            notes: None,
            h: rng.gen_range(-2..=2),
            r: rng.gen_range(-2..=2),
            d: rng.gen_range(-2..=2),
            e: rng.gen_range(-2..=2),
            tags: None,
        })
        .collect();
    let exposures = (0..600u64)
        .map(|i| Exposure {
            id: i,
            occurred_at: shift_back(end, rng.gen_range(0..365)).and_hms_opt(9, 0, 0).unwrap(),
            kind: EXPOSURE_TYPES[rng.gen_range(0..EXPOSURE_TYPES.len())].to_string(),
            notes: None,
        })
        .collect();
    (actions, exposures)
}

fn bench_saturate(c: &mut Criterion) {
    c.bench_function("saturate", |b| b.iter(|| saturate(black_box(1.7), black_box(0.6))));
}

fn bench_window_aggregate(c: &mut Criterion) {
    let (actions, exposures) = synthetic_events();
    let window = DecayWindow::new(60, 21);
    let day = end_date();
    let buckets = DayBuckets::build(
        EventSnapshot::new(&actions, &exposures),
        window.horizon_for(&DateRange::single(day)),
    );

    c.bench_function("window_aggregate", |b| {
        b.iter(|| window.aggregate(black_box(&buckets), black_box(day)))
    });
}

fn bench_series_90_days(c: &mut Criterion) {
    let (actions, exposures) = synthetic_events();
    let engine = ReadinessEngine::new();
    let settings = Settings::defaults(Utc::now());
    let end = end_date();
    let range = DateRange::new(shift_back(end, 89), end).unwrap();

    c.bench_function("series_90_days", |b| {
        b.iter(|| {
            engine.series(
                black_box(EventSnapshot::new(&actions, &exposures)),
                black_box(&range),
                black_box(&settings),
            )
        })
    });
}

criterion_group!(benches, bench_saturate, bench_window_aggregate, bench_series_90_days);
criterion_main!(benches);
