//! The slot engine: one isolated run of the four-stage pipeline.

use crate::access::AccessController;
use crate::channel::Channel;
use crate::error::ParamError;
use crate::params::{Protocol, SimParams};
use crate::report::RunReport;
use crate::resolver::{self, SlotOutcome};
use crate::source::Source;
use crate::stats::{MetricSeries, RunCounters};
use crate::traffic::TrafficGenerator;
use crate::Slot;

use slotsim_env::{CancelToken, NullObserver, Progress, RandomSource, SlotObserver};
use tracing::{debug, info, warn};

/// Upper bound on the series capacity reserved up front.
const MAX_PREALLOCATED_SLOTS: u64 = 1 << 20;

/// Everything a run mutates, owned by exactly one engine.
#[derive(Debug, Clone)]
struct SlotState {
    sources: Vec<Source>,
    channel: Channel,
    counters: RunCounters,
    series: MetricSeries,

    /// Last completed slot (0 before the first)
    slot: Slot,
}

/// A single simulation run.
///
/// Each engine owns its sources, channel, counters and RNG, so any number
/// of engines can run side by side (e.g. in a parameter sweep) without
/// sharing state.
pub struct Engine<R> {
    params: SimParams,
    protocol: Protocol,
    traffic: TrafficGenerator,
    access: AccessController,
    state: SlotState,
    rng: R,
}

impl<R: RandomSource> Engine<R> {
    /// Validates `params` and builds an engine with every source idle.
    pub fn new(params: SimParams, protocol: Protocol, rng: R) -> Result<Self, ParamError> {
        params.validate()?;

        let capacity = params.simulation_time.min(MAX_PREALLOCATED_SLOTS) as usize;
        let state = SlotState {
            sources: vec![Source::new(); params.source_number],
            channel: Channel::new(protocol),
            counters: RunCounters::default(),
            series: MetricSeries::with_capacity(capacity),
            slot: 0,
        };

        Ok(Self {
            params,
            protocol,
            traffic: TrafficGenerator::new(&params),
            access: AccessController::new(),
            state,
            rng,
        })
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Number of completed slots.
    pub fn slot(&self) -> Slot {
        self.state.slot
    }

    pub fn sources(&self) -> &[Source] {
        &self.state.sources
    }

    pub fn counters(&self) -> &RunCounters {
        &self.state.counters
    }

    pub fn channel(&self) -> &Channel {
        &self.state.channel
    }

    pub fn series(&self) -> &MetricSeries {
        &self.state.series
    }

    /// True once `simulation_time` slots have been processed.
    pub fn is_finished(&self) -> bool {
        self.state.slot >= self.params.simulation_time
    }

    /// Progress snapshot for observers.
    pub fn progress(&self) -> Progress {
        Progress {
            slots_completed: self.state.slot,
            total_slots: self.params.simulation_time,
            attempts: self.state.counters.attempts,
            successes: self.state.counters.successes,
        }
    }

    /// Processes exactly one slot.
    ///
    /// Generator, controller, resolver and accumulator run in that order;
    /// the backlog countdown closes the slot. Returns None once the run is
    /// complete.
    pub fn step(&mut self) -> Option<SlotOutcome> {
        if self.is_finished() {
            return None;
        }
        let slot = self.state.slot + 1;
        let state = &mut self.state;

        self.traffic
            .generate(&mut state.sources, slot, &state.channel, &mut self.rng);
        let attempters = self
            .access
            .select(&mut state.sources, &state.channel, &mut state.counters);
        let outcome = resolver::resolve(&mut state.sources, &attempters, slot, &mut state.counters);
        state.channel.settle(&outcome);
        resolver::count_down(&mut state.sources);
        state.series.record(slot, &state.counters);
        state.slot = slot;

        Some(outcome)
    }

    /// Runs to completion or until `cancel` is raised.
    ///
    /// Cancellation is checked before each slot, so the report always
    /// covers whole slots only.
    pub fn run(mut self, cancel: &CancelToken, observer: &mut dyn SlotObserver) -> RunReport {
        info!(
            "Starting {} run: {} sources, p={}, max_backoff={}, {} slots (seed={})",
            self.protocol.label(),
            self.params.source_number,
            self.params.packet_ready_prob,
            self.params.max_backoff,
            self.params.simulation_time,
            self.rng.seed(),
        );

        let mut cancelled = false;
        while !self.is_finished() {
            if cancel.is_cancelled() {
                cancelled = true;
                warn!(
                    "Run cancelled after {}/{} slots",
                    self.state.slot, self.params.simulation_time
                );
                break;
            }
            self.step();
            observer.on_slot(&self.progress());
        }

        observer.finish(&self.progress(), cancelled);
        let report = self.into_report(cancelled);
        debug!(
            "Run finished: S={:.4} G={:.4} Pc={:.4} D={:.2}",
            report.metrics.throughput,
            report.metrics.traffic_offered,
            report.metrics.pckt_collision_prob,
            report.metrics.mean_delay,
        );
        report
    }

    /// Runs headlessly to completion.
    pub fn run_to_end(self) -> RunReport {
        self.run(&CancelToken::new(), &mut NullObserver)
    }

    /// Freezes the engine into a report covering the completed slots.
    pub fn into_report(self, cancelled: bool) -> RunReport {
        RunReport::new(
            self.protocol,
            self.params,
            self.rng.seed(),
            self.state.slot,
            cancelled,
            self.state.counters,
            self.state.series,
        )
    }
}

/// Validates, runs headlessly, and returns the report.
pub fn simulate<R: RandomSource>(
    params: SimParams,
    protocol: Protocol,
    rng: R,
) -> Result<RunReport, ParamError> {
    Ok(Engine::new(params, protocol, rng)?.run_to_end())
}
