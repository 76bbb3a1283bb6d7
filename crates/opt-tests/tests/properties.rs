//! Property tests across the full query path.

use opt_core::calendar::shift_back;
use opt_core::constants::IRREVERSIBILITY_MAX;
use opt_core::math::round_to;
use opt_tests::helpers::*;
use proptest::prelude::*;

const KINDS: [&str; 6] = ["post", "application", "interview", "proposal", "coffee", "Outreach "];

fn arb_actions() -> impl Strategy<Value = Vec<(u64, i8, i8, i8, i8)>> {
    prop::collection::vec((0u64..120, -2i8..=2, -2i8..=2, -2i8..=2, -2i8..=2), 0..40)
}

fn arb_exposures() -> impl Strategy<Value = Vec<(u64, usize)>> {
    prop::collection::vec((0u64..120, 0usize..KINDS.len()), 0..25)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn query_outputs_are_well_formed(
        actions in arb_actions(),
        exposures in arb_exposures(),
        span in 1u64..45,
    ) {
        let node = memory_node();
        let end = d(2024, 6, 30);
        for (back, h, r, dd, e) in actions {
            node.store().insert_action(new_action(shift_back(end, back), h, r, dd, e)).unwrap();
        }
        for (back, k) in exposures {
            node.store().insert_exposure(new_exposure(shift_back(end, back), KINDS[k])).unwrap();
        }
        let r = range(shift_back(end, span - 1), end);

        let series = node.queries().income_series(&r).unwrap();
        prop_assert_eq!(series.daily.len(), span as usize);
        prop_assert_eq!(series.current, series.daily.last().copied());
        for p in &series.daily {
            for v in [p.capitals.s, p.capitals.n, p.capitals.l, p.capitals.e, p.confidence] {
                prop_assert!((0.0..=1.0).contains(&v));
                prop_assert_eq!(round_to(v, 4), v);
            }
            prop_assert!((0.0..=100.0).contains(&p.readiness));
            prop_assert_eq!(round_to(p.readiness, 2), p.readiness);
        }

        let s = node.queries().analytics_summary(&r).unwrap();
        prop_assert_eq!(s.daily.len(), span as usize);
        let mut running = 0i64;
        for p in &s.daily {
            running += p.o_delta_sum;
            prop_assert_eq!(p.cumulative, running);
            prop_assert!(p.constraint_debt_7d <= 0);
            prop_assert!((0.0..=IRREVERSIBILITY_MAX).contains(&p.irreversibility_avg));
        }
        prop_assert_eq!(s.totals.sum_o_delta, running);
        let weekly_total: u64 = s.weekly_exposure.iter().map(|w| w.count).sum();
        prop_assert_eq!(s.totals.exposure_count_period, weekly_total);
        for pair in s.weekly_exposure.windows(2) {
            prop_assert!(pair[0].week_start < pair[1].week_start);
        }
    }
}
