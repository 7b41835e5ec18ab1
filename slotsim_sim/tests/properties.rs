//! Property tests over random parameters and seeds.

use proptest::prelude::*;
use slotsim_core::{simulate, Engine, Protocol, SimParams};
use slotsim_env::SeededSource;

fn protocol_strategy() -> impl Strategy<Value = Protocol> {
    prop_oneof![Just(Protocol::Aloha), Just(Protocol::CsmaCa)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn series_stay_in_bounds(
        sources in 1usize..8,
        p in 0.0f64..=1.0,
        max_backoff in 1u32..10,
        time in 1u64..200,
        seed in any::<u64>(),
        protocol in protocol_strategy(),
    ) {
        let params = SimParams::new(sources, p, max_backoff, time);
        let report = simulate(params, protocol, SeededSource::new(seed)).unwrap();
        let series = report.time_series();

        prop_assert_eq!(series.len() as u64, time);
        for t in 0..series.len() {
            let g = series.offered_traffic[t];
            let s = series.throughput[t];
            let pc = series.pckt_collision_prob[t];
            prop_assert!(g >= 0.0);
            prop_assert!(s >= 0.0 && s <= g);
            prop_assert!(s <= 1.0);
            prop_assert!((0.0..=1.0).contains(&pc));
            prop_assert!(series.mean_delay[t] >= 0.0);
        }
    }

    #[test]
    fn counters_never_decrease(
        sources in 1usize..8,
        p in 0.0f64..=1.0,
        max_backoff in 1u32..10,
        seed in any::<u64>(),
        protocol in protocol_strategy(),
    ) {
        let params = SimParams::new(sources, p, max_backoff, 150);
        let mut engine = Engine::new(params, protocol, SeededSource::new(seed)).unwrap();

        let mut last = engine.counters().clone();
        while engine.step().is_some() {
            let now = engine.counters();
            prop_assert!(now.attempts >= last.attempts);
            prop_assert!(now.successes >= last.successes);
            prop_assert!(now.collisions >= last.collisions);
            prop_assert!(now.successes <= now.attempts);
            prop_assert_eq!(now.delays.len() as u64, now.successes);
            last = now.clone();
        }

        // A delay never exceeds the time elapsed
        prop_assert!(last.delays.iter().all(|&d| d < 150));
    }

    #[test]
    fn single_source_never_collides(
        p in 0.0f64..=1.0,
        max_backoff in 1u32..10,
        time in 1u64..200,
        seed in any::<u64>(),
        protocol in protocol_strategy(),
    ) {
        let params = SimParams::new(1, p, max_backoff, time);
        let report = simulate(params, protocol, SeededSource::new(seed)).unwrap();

        prop_assert_eq!(report.counters.collisions, 0);
        prop_assert!(report.time_series().pckt_collision_prob.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn idle_sources_produce_nothing(
        sources in 1usize..8,
        max_backoff in 1u32..10,
        time in 1u64..200,
        seed in any::<u64>(),
        protocol in protocol_strategy(),
    ) {
        let params = SimParams::new(sources, 0.0, max_backoff, time);
        let report = simulate(params, protocol, SeededSource::new(seed)).unwrap();
        let series = report.time_series();

        prop_assert!(series.throughput.iter().all(|&s| s == 0.0));
        prop_assert!(series.offered_traffic.iter().all(|&g| g == 0.0));
        prop_assert!(series.mean_delay.iter().all(|&d| d == time as f64));
    }

    #[test]
    fn same_seed_is_bit_identical(
        sources in 1usize..8,
        p in 0.0f64..=1.0,
        max_backoff in 1u32..10,
        time in 1u64..200,
        seed in any::<u64>(),
        protocol in protocol_strategy(),
    ) {
        let params = SimParams::new(sources, p, max_backoff, time);
        let a = simulate(params, protocol, SeededSource::new(seed)).unwrap().time_series();
        let b = simulate(params, protocol, SeededSource::new(seed)).unwrap().time_series();

        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&a.throughput), bits(&b.throughput));
        prop_assert_eq!(bits(&a.offered_traffic), bits(&b.offered_traffic));
        prop_assert_eq!(bits(&a.mean_delay), bits(&b.mean_delay));
        prop_assert_eq!(bits(&a.pckt_collision_prob), bits(&b.pckt_collision_prob));
    }
}
