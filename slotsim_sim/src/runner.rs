//! Run orchestration: single runs, protocol comparisons, parameter sweeps.

use crate::progress::{sweep_bar, ProgressObserver};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use slotsim_core::theory;
use slotsim_core::{Engine, Metrics, ParamError, Protocol, RunReport, SimParams};
use slotsim_env::{CancelToken, EntropySource, NullObserver, RandomSource, SeededSource};
use tracing::{debug, info};

/// One point of a packet-ready-probability sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub packet_ready_prob: f64,

    /// Metrics at the last completed slot of this point's run
    pub metrics: Metrics,

    pub completed_slots: u64,
    pub cancelled: bool,

    /// Slotted ALOHA throughput `G * e^(-G)` at the measured offered load
    pub aloha_reference: f64,
}

impl SweepPoint {
    fn from_report(report: &RunReport) -> Self {
        Self {
            packet_ready_prob: report.params.packet_ready_prob,
            metrics: report.metrics,
            completed_slots: report.completed_slots,
            cancelled: report.cancelled,
            aloha_reference: theory::poisson_throughput(report.metrics.traffic_offered),
        }
    }
}

/// `steps` evenly spaced probabilities in `(0, 1]`.
pub fn probability_grid(steps: usize) -> Vec<f64> {
    (1..=steps).map(|i| i as f64 / steps as f64).collect()
}

/// Drives engine runs.
///
/// Every run builds a fresh engine with its own random source, so results
/// depend only on the seed and parameters, never on what ran before.
#[derive(Debug, Clone)]
pub struct SimRunner {
    /// Master seed (None = OS entropy, not reproducible)
    seed: Option<u64>,

    /// Draw a terminal progress bar
    show_progress: bool,

    /// Shared stop request
    cancel: CancelToken,
}

impl SimRunner {
    /// Creates a runner whose runs are reproducible from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            show_progress: false,
            cancel: CancelToken::new(),
        }
    }

    /// Creates a runner drawing from OS entropy.
    pub fn unseeded() -> Self {
        Self {
            seed: None,
            ..Self::new(0)
        }
    }

    /// Enables or disables the progress bar.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Uses an externally owned cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Handle that stops every run driven by this runner.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Runs one protocol with the runner's seed.
    pub fn run(&self, protocol: Protocol, params: SimParams) -> Result<RunReport, ParamError> {
        match self.seed {
            Some(seed) => self.run_with(protocol, params, SeededSource::new(seed)),
            None => self.run_with(protocol, params, EntropySource::new()),
        }
    }

    /// Runs one protocol with an explicit random source.
    pub fn run_with<R: RandomSource>(
        &self,
        protocol: Protocol,
        params: SimParams,
        rng: R,
    ) -> Result<RunReport, ParamError> {
        let engine = Engine::new(params, protocol, rng)?;
        let report = if self.show_progress {
            let mut bar = ProgressObserver::new(params.simulation_time, protocol.name());
            engine.run(&self.cancel, &mut bar)
        } else {
            engine.run(&self.cancel, &mut NullObserver)
        };
        Ok(report)
    }

    /// Runs both protocols on the same seed and parameters.
    pub fn compare(&self, params: SimParams) -> Result<Vec<RunReport>, ParamError> {
        Protocol::all()
            .into_iter()
            .map(|protocol| self.run(protocol, params))
            .collect()
    }

    /// Runs one engine per probability in `probs`, in parallel.
    ///
    /// All points are validated before any runs. Point `i` draws from
    /// stream `i` of the master seed, so the sweep is reproducible
    /// regardless of thread scheduling.
    pub fn sweep(
        &self,
        protocol: Protocol,
        params: SimParams,
        probs: &[f64],
    ) -> Result<Vec<SweepPoint>, ParamError> {
        for &p in probs {
            params.with_probability(p).validate()?;
        }
        info!(
            "Sweeping {} over {} probabilities ({} sources, {} slots each)",
            protocol.label(),
            probs.len(),
            params.source_number,
            params.simulation_time,
        );

        let bar = self.show_progress.then(|| sweep_bar(probs.len() as u64));
        let master = self.seed.map(SeededSource::new);

        let points = probs
            .par_iter()
            .enumerate()
            .map(|(idx, &p)| -> Result<SweepPoint, ParamError> {
                let point_params = params.with_probability(p);
                let report = match &master {
                    Some(master) => Engine::new(point_params, protocol, master.derive(idx as u64))
                        .map(|engine| engine.run(&self.cancel, &mut NullObserver)),
                    None => Engine::new(point_params, protocol, EntropySource::new())
                        .map(|engine| engine.run(&self.cancel, &mut NullObserver)),
                }?;
                debug!(
                    "sweep p={:.4}: S={:.4} G={:.4}",
                    p, report.metrics.throughput, report.metrics.traffic_offered
                );
                if let Some(bar) = &bar {
                    bar.inc(1);
                }
                Ok(SweepPoint::from_report(&report))
            })
            .collect::<Result<Vec<_>, ParamError>>()?;

        if let Some(bar) = bar {
            bar.finish();
        }
        Ok(points)
    }
}
