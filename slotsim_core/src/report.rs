//! Run results.

use crate::params::{Protocol, SimParams};
use crate::stats::{MetricSeries, Metrics, RunCounters};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four metric series with the mean-delay sentinel applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub offered_traffic: Vec<f64>,
    pub throughput: Vec<f64>,
    pub mean_delay: Vec<f64>,
    pub pckt_collision_prob: Vec<f64>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.throughput.len()
    }

    pub fn is_empty(&self) -> bool {
        self.throughput.is_empty()
    }
}

/// Outcome of one run, complete or cancelled.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub protocol: Protocol,
    pub params: SimParams,

    /// Seed of the random source (0 when unseeded)
    pub seed: u64,

    /// Slots actually processed
    pub completed_slots: u64,

    /// Whether the run stopped early on request
    pub cancelled: bool,

    /// Metrics at the last completed slot
    pub metrics: Metrics,

    pub counters: RunCounters,

    series: MetricSeries,
}

impl RunReport {
    pub(crate) fn new(
        protocol: Protocol,
        params: SimParams,
        seed: u64,
        completed_slots: u64,
        cancelled: bool,
        counters: RunCounters,
        series: MetricSeries,
    ) -> Self {
        let sentinel = completed_slots as f64;
        let metrics = series
            .last(sentinel)
            .unwrap_or_else(|| Metrics::from_counters(&counters, completed_slots, sentinel));
        Self {
            protocol,
            params,
            seed,
            completed_slots,
            cancelled,
            metrics,
            counters,
            series,
        }
    }

    /// Mean delay reported before the first success.
    ///
    /// Equals the run's effective duration: `simulation_time` for a
    /// complete run, the completed slot count for a cancelled one. This is
    /// a placeholder, not a real mean; consumers averaging or plotting the
    /// delay series should be aware of it.
    pub fn delay_sentinel(&self) -> f64 {
        self.completed_slots as f64
    }

    /// Raw per-slot history.
    pub fn series(&self) -> &MetricSeries {
        &self.series
    }

    /// The four series, sentinel applied.
    pub fn time_series(&self) -> TimeSeries {
        let sentinel = self.delay_sentinel();
        TimeSeries {
            offered_traffic: self.series.offered_traffic().to_vec(),
            throughput: self.series.throughput().to_vec(),
            mean_delay: self.series.mean_delay(sentinel),
            pckt_collision_prob: self.series.collision_probability().to_vec(),
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Protocol:          {}", self.protocol.label())?;
        writeln!(
            f,
            "Parameters:        sources={} p={} max_backoff={} slots={}",
            self.params.source_number,
            self.params.packet_ready_prob,
            self.params.max_backoff,
            self.params.simulation_time,
        )?;
        if self.cancelled {
            writeln!(
                f,
                "Status:            cancelled after {} slots",
                self.completed_slots
            )?;
        }
        writeln!(f, "Throughput:        {:.4}", self.metrics.throughput)?;
        writeln!(f, "Mean delay:        {:.4} slots", self.metrics.mean_delay)?;
        writeln!(f, "Traffic offered:   {:.4}", self.metrics.traffic_offered)?;
        write!(f, "Collision prob.:   {:.4}", self.metrics.pckt_collision_prob)
    }
}
