//! End-to-end tests: events go in through the store, series and summaries
//! come out of the query service, exactly as the HTTP layer sees them.

use opt_core::calendar::shift_back;
use opt_core::types::SettingsUpdate;
use opt_tests::helpers::*;

// ---------------------------------------------------------------------------
// Reference week
// ---------------------------------------------------------------------------

#[test]
fn reference_week_summary() {
    let node = memory_node();
    seed_reference_week(&node);

    let s = node
        .queries()
        .analytics_summary(&range(d(2024, 1, 1), d(2024, 1, 8)))
        .unwrap();

    let sums: Vec<i64> = s.daily.iter().map(|p| p.o_delta_sum).collect();
    assert_eq!(sums, vec![3, -2, -1, 0, 0, 0, 0, -4]);
    assert_eq!(s.daily[0].cumulative, 3);
    assert_eq!(s.daily[2].cumulative, 0);
    assert_eq!(s.daily[7].cumulative, -4);
    assert_eq!(s.totals.sum_o_delta, -4);
    assert_eq!(s.totals.avg_o_delta, -0.5);
    assert_eq!(s.totals.constraint_debt_7d_last, -7);
    assert_eq!(s.daily[7].constraint_debt_7d, -7);
    assert_eq!(s.daily[1].constraint_debt_7d, -2);
}

#[test]
fn cumulative_and_debt_invariants_hold() {
    let node = memory_node();
    seed_reference_week(&node);
    let s = node
        .queries()
        .analytics_summary(&range(d(2024, 1, 1), d(2024, 1, 8)))
        .unwrap();

    assert_eq!(s.daily[0].cumulative, s.daily[0].o_delta_sum);
    for i in 1..s.daily.len() {
        assert_eq!(s.daily[i].cumulative, s.daily[i - 1].cumulative + s.daily[i].o_delta_sum);
        let lo = i.saturating_sub(6);
        let debt: i64 = s.daily[lo..=i].iter().map(|p| p.o_delta_sum.min(0)).sum();
        assert_eq!(s.daily[i].constraint_debt_7d, debt);
    }
}

// ---------------------------------------------------------------------------
// Empty inputs
// ---------------------------------------------------------------------------

#[test]
fn empty_store_yields_neutral_outputs() {
    let node = memory_node();
    let r = range(d(2024, 5, 1), d(2024, 5, 14));

    let s = node.queries().analytics_summary(&r).unwrap();
    assert_eq!(s.daily.len(), 14);
    for p in &s.daily {
        assert_eq!((p.o_delta_sum, p.cumulative, p.constraint_debt_7d), (0, 0, 0));
        assert_eq!(p.irreversibility_avg, 0.0);
    }
    assert!(s.weekly_exposure.is_empty());

    let series = node.queries().income_series(&r).unwrap();
    assert_eq!(series.daily.len(), 14);
    for p in &series.daily {
        assert!(p.low_data_confidence);
        assert_eq!(p.confidence, 0.0);
        assert_eq!(p.readiness, 50.0);
        assert_eq!((p.capitals.s, p.capitals.n, p.capitals.l, p.capitals.e), (0.5, 0.5, 0.5, 0.5));
    }
    assert_eq!(s.totals.readiness_latest, 50.0);
}

// ---------------------------------------------------------------------------
// Irreversibility and weekly buckets
// ---------------------------------------------------------------------------

#[test]
fn irreversibility_averages_per_day() {
    let node = memory_node();
    let day = d(2024, 2, 5);
    node.store().insert_action(new_action(day, 0, -2, 0, 0)).unwrap();
    node.store().insert_action(new_action(day, 0, 2, 0, 0)).unwrap();

    let s = node.queries().analytics_summary(&range(day, day)).unwrap();
    assert_eq!(s.daily[0].irreversibility_avg, 2.0);
}

#[test]
fn exposures_bucket_by_monday() {
    let node = memory_node();
    node.store().insert_exposure(new_exposure(d(2024, 1, 2), "post")).unwrap();
    node.store().insert_exposure(new_exposure(d(2024, 1, 8), "application")).unwrap();

    let s = node
        .queries()
        .analytics_summary(&range(d(2024, 1, 1), d(2024, 1, 14)))
        .unwrap();
    let weeks: Vec<_> = s.weekly_exposure.iter().map(|w| (w.week_start, w.count)).collect();
    assert_eq!(weeks, vec![(d(2024, 1, 1), 1), (d(2024, 1, 8), 1)]);
    assert_eq!(s.totals.exposure_count_period, 2);
}

#[test]
fn week_starting_before_range_is_kept() {
    let node = memory_node();
    // Wednesday 2024-01-03 belongs to the week of Monday 2024-01-01.
    node.store().insert_exposure(new_exposure(d(2024, 1, 3), "post")).unwrap();
    let s = node
        .queries()
        .analytics_summary(&range(d(2024, 1, 3), d(2024, 1, 10)))
        .unwrap();
    assert_eq!(s.weekly_exposure[0].week_start, d(2024, 1, 1));
}

// ---------------------------------------------------------------------------
// Readiness
// ---------------------------------------------------------------------------

#[test]
fn five_active_days_clear_low_data() {
    let node = memory_node();
    let end = d(2024, 3, 10);
    for i in 0..5 {
        let day = shift_back(end, i);
        node.store().insert_action(new_action(day, 1, 0, 0, 1)).unwrap();
        node.store().insert_exposure(new_exposure(day, "outreach")).unwrap();
    }
    let current = node
        .queries()
        .income_series(&range(d(2024, 3, 1), end))
        .unwrap()
        .current
        .unwrap();
    assert!(!current.low_data_confidence);
    assert!(current.confidence > 0.0 && current.confidence < 1.0);
    assert!(current.readiness > 0.0 && current.readiness < 100.0);
}

#[test]
fn old_events_feed_first_day_of_range() {
    let node = memory_node();
    node.store().insert_exposure(new_exposure(d(2024, 1, 15), "interview")).unwrap();

    let start = d(2024, 3, 1);
    let first = node.queries().income_series(&range(start, start)).unwrap().daily[0];
    assert!(first.capitals.n > 0.0 && first.capitals.n != 0.5);

    // Beyond the 60-day window the exposure no longer counts.
    let later = d(2024, 3, 20);
    let p = node.queries().income_series(&range(later, later)).unwrap().daily[0];
    assert_eq!(p.capitals.n, 0.5);
}

#[test]
fn settings_update_changes_readiness_not_capitals() {
    let node = memory_node();
    let end = d(2024, 4, 1);
    for i in 0..10 {
        node.store().insert_action(new_action(shift_back(end, i), 2, 0, 0, 2)).unwrap();
    }
    let r = range(end, end);
    let before = node.queries().income_series(&r).unwrap();

    node.settings()
        .update(SettingsUpdate {
            target_daily_income: 200,
            w_s: 0.7,
            w_n: 0.1,
            w_l: 0.1,
            w_e: 0.1,
            half_life_days: 21,
            exposure_goal_per_week: 5,
        })
        .unwrap();
    let after = node.queries().income_series(&r).unwrap();

    assert_eq!(after.settings.w_s, 0.7);
    assert_eq!(after.daily[0].capitals, before.daily[0].capitals);
    assert!(after.daily[0].readiness > before.daily[0].readiness);
}

#[test]
fn summary_and_series_agree_on_latest_point() {
    let node = memory_node();
    seed_reference_week(&node);
    node.store().insert_exposure(new_exposure(d(2023, 12, 28), "proposal")).unwrap();

    let r = range(d(2024, 1, 1), d(2024, 1, 8));
    let current = node.queries().income_series(&r).unwrap().current.unwrap();
    let totals = node.queries().analytics_summary(&r).unwrap().totals;
    assert_eq!(totals.readiness_latest, current.readiness);
    assert_eq!(totals.capitals_latest, current.capitals);
    assert_eq!(totals.confidence_latest, current.confidence);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn reopened_node_reproduces_summary() {
    let (node, dir) = disk_node();
    seed_reference_week(&node);
    let r = range(d(2024, 1, 1), d(2024, 1, 8));
    let before = node.queries().analytics_summary(&r).unwrap();
    let config = node.config().clone();
    drop(node);

    let reopened = opt_node_lib::Node::new(config).unwrap();
    assert_eq!(reopened.queries().analytics_summary(&r).unwrap(), before);
    drop(dir);
}
