//! End-to-end scenarios through the public API.

use approx::assert_relative_eq;
use slotsim_core::{simulate, Engine, Protocol, SimParams, SlotOutcome};
use slotsim_env::{CancelToken, NullObserver, Progress, SeededSource, SlotObserver};
use slotsim_sim::{Preset, SimRunner};

/// Raises the token once a given slot has completed.
struct CancelAt {
    token: CancelToken,
    at: u64,
}

impl SlotObserver for CancelAt {
    fn on_slot(&mut self, progress: &Progress) {
        if progress.slots_completed == self.at {
            self.token.cancel();
        }
    }
}

#[test]
fn test_single_saturated_source() {
    let report = SimRunner::new(42)
        .run(Preset::SingleSource.protocol(), Preset::SingleSource.params())
        .unwrap();

    assert_relative_eq!(report.metrics.throughput, 1.0);
    assert_relative_eq!(report.metrics.traffic_offered, 1.0);
    assert_relative_eq!(report.metrics.pckt_collision_prob, 0.0);
    assert_relative_eq!(report.metrics.mean_delay, 0.0);
    // Delivered every slot, ready in the same slot
    assert!(report.counters.delays.iter().all(|&d| d == 0));
}

#[test]
fn test_guaranteed_collision() {
    let report = SimRunner::new(42)
        .run(
            Preset::GuaranteedCollision.protocol(),
            Preset::GuaranteedCollision.params(),
        )
        .unwrap();

    assert_relative_eq!(report.metrics.pckt_collision_prob, 1.0);
    assert_relative_eq!(report.metrics.throughput, 0.0);
    assert_relative_eq!(report.metrics.mean_delay, 1.0);
}

#[test]
fn test_cancelled_run_matches_shorter_run() {
    let params = SimParams::new(6, 0.15, 5, 400);
    let k = 137;

    for protocol in Protocol::all() {
        let token = CancelToken::new();
        let mut observer = CancelAt {
            token: token.clone(),
            at: k,
        };
        let engine = Engine::new(params, protocol, SeededSource::new(11)).unwrap();
        let cancelled = engine.run(&token, &mut observer);

        let short = simulate(params.with_duration(k), protocol, SeededSource::new(11)).unwrap();

        assert!(cancelled.cancelled);
        assert!(!short.cancelled);
        assert_eq!(cancelled.completed_slots, k);
        assert_eq!(cancelled.counters, short.counters);
        assert_eq!(cancelled.metrics, short.metrics);
        assert_eq!(cancelled.time_series(), short.time_series());
    }
}

#[test]
fn test_cancel_on_last_slot_is_not_a_cancellation() {
    let params = SimParams::new(3, 0.3, 4, 50);
    let token = CancelToken::new();
    let mut observer = CancelAt {
        token: token.clone(),
        at: 50,
    };
    let report = Engine::new(params, Protocol::Aloha, SeededSource::new(2))
        .unwrap()
        .run(&token, &mut observer);

    assert!(!report.cancelled);
    assert_eq!(report.completed_slots, 50);
}

#[test]
fn test_idle_run_reports_sentinel_everywhere() {
    let params = SimParams::new(5, 0.0, 8, 30);
    for protocol in Protocol::all() {
        let report = simulate(params, protocol, SeededSource::new(1)).unwrap();
        let series = report.time_series();

        assert!(series.throughput.iter().all(|&s| s == 0.0));
        assert!(series.offered_traffic.iter().all(|&g| g == 0.0));
        assert!(series.pckt_collision_prob.iter().all(|&c| c == 0.0));
        assert!(series.mean_delay.iter().all(|&d| d == 30.0));
    }
}

#[test]
fn test_csma_busy_slot_only_carries_unit_backoffs() {
    let params = SimParams::new(8, 0.3, 6, 500);
    let mut engine = Engine::new(params, Protocol::CsmaCa, SeededSource::new(77)).unwrap();

    let mut previous = SlotOutcome::Silent;
    let mut quiet_after_success = 0;
    while let Some(outcome) = engine.step() {
        if matches!(previous, SlotOutcome::Success { .. }) {
            let talkers = match &outcome {
                SlotOutcome::Silent => vec![],
                SlotOutcome::Success { source, .. } => vec![*source],
                SlotOutcome::Collision { sources } => sources.clone(),
            };
            if talkers.is_empty() {
                quiet_after_success += 1;
            }
            for idx in talkers {
                assert_eq!(engine.sources()[idx].backoff(), 1);
            }
        }
        previous = outcome;
    }
    assert!(engine.counters().successes > 0);
    assert!(quiet_after_success > 0);
}

#[test]
fn test_csma_unit_backoff_source_delivers_every_slot() {
    // A backoff of 1 leaves nothing to defer by
    let params = SimParams::new(1, 1.0, 1, 20);
    let report = SimRunner::new(5).run(Protocol::CsmaCa, params).unwrap();
    assert_eq!(report.counters.successes, 20);
}

#[test]
fn test_heavy_aloha_load_below_capacity() {
    // Past the 1/e peak the channel cannot deliver more than one packet per slot
    let report = SimRunner::new(3)
        .run(Preset::HeavyLoad.protocol(), Preset::HeavyLoad.params())
        .unwrap();

    assert!(report.metrics.throughput < 1.0);
    assert!(report.metrics.pckt_collision_prob > 0.0);
    assert!(report.metrics.traffic_offered > report.metrics.throughput);
}

#[test]
fn test_engine_is_headless() {
    let params = SimParams::new(4, 0.2, 4, 100);
    let report = Engine::new(params, Protocol::Aloha, SeededSource::new(8))
        .unwrap()
        .run(&CancelToken::new(), &mut NullObserver);
    assert_eq!(report.completed_slots, 100);
}
