//! Statistics Accumulator
//! ======================
//!
//! Converts discrete slot events into running metrics:
//! - **Offered traffic**: cumulative attempts / elapsed slots
//! - **Throughput**: cumulative successes / elapsed slots
//! - **Collision probability**: cumulative collisions / elapsed slots
//! - **Mean delay**: mean of all success delays so far
//!
//! Mean delay is undefined until the first success. Internally that is
//! kept as `None`; readers substitute the run's sentinel (its duration)
//! when they materialise the series.

use serde::{Deserialize, Serialize};

// =============================================================================
// RAW COUNTERS
// =============================================================================

/// Monotonic counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    /// Transmission attempts, retransmissions included
    pub attempts: u64,

    /// Acknowledged packets
    pub successes: u64,

    /// Slots with two or more attempts
    pub collisions: u64,

    /// Delay of each success, in order
    pub delays: Vec<u64>,

    /// Sum of `delays`
    pub delay_total: u64,
}

impl RunCounters {
    pub fn record_attempts(&mut self, count: u64) {
        self.attempts += count;
    }

    pub fn record_success(&mut self, delay: u64) {
        self.successes += 1;
        self.delays.push(delay);
        self.delay_total += delay;
    }

    pub fn record_collision(&mut self) {
        self.collisions += 1;
    }

    /// Arithmetic mean of recorded delays, None before the first success.
    pub fn mean_delay(&self) -> Option<f64> {
        if self.delays.is_empty() {
            None
        } else {
            Some(self.delay_total as f64 / self.delays.len() as f64)
        }
    }
}

// =============================================================================
// SCALAR METRICS
// =============================================================================

/// The four headline metrics at one slot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub throughput: f64,
    pub mean_delay: f64,
    pub traffic_offered: f64,
    pub pckt_collision_prob: f64,
}

impl Metrics {
    /// Derives metrics from counters after `slot` elapsed slots.
    ///
    /// `sentinel` stands in for the mean delay when nothing succeeded yet.
    pub fn from_counters(counters: &RunCounters, slot: u64, sentinel: f64) -> Self {
        if slot == 0 {
            return Self {
                mean_delay: sentinel,
                ..Self::default()
            };
        }
        let elapsed = slot as f64;
        Self {
            throughput: counters.successes as f64 / elapsed,
            mean_delay: counters.mean_delay().unwrap_or(sentinel),
            traffic_offered: counters.attempts as f64 / elapsed,
            pckt_collision_prob: counters.collisions as f64 / elapsed,
        }
    }
}

// =============================================================================
// TIME SERIES
// =============================================================================

/// Per-slot metric history, one entry per completed slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSeries {
    offered_traffic: Vec<f64>,
    throughput: Vec<f64>,
    collision_probability: Vec<f64>,
    mean_delay: Vec<Option<f64>>,
}

impl MetricSeries {
    pub fn with_capacity(slots: usize) -> Self {
        Self {
            offered_traffic: Vec::with_capacity(slots),
            throughput: Vec::with_capacity(slots),
            collision_probability: Vec::with_capacity(slots),
            mean_delay: Vec::with_capacity(slots),
        }
    }

    /// Appends the metrics as of `slot` (1-indexed).
    pub fn record(&mut self, slot: u64, counters: &RunCounters) {
        let elapsed = slot.max(1) as f64;
        self.offered_traffic.push(counters.attempts as f64 / elapsed);
        self.throughput.push(counters.successes as f64 / elapsed);
        self.collision_probability
            .push(counters.collisions as f64 / elapsed);
        self.mean_delay.push(counters.mean_delay());
    }

    pub fn len(&self) -> usize {
        self.throughput.len()
    }

    pub fn is_empty(&self) -> bool {
        self.throughput.is_empty()
    }

    pub fn offered_traffic(&self) -> &[f64] {
        &self.offered_traffic
    }

    pub fn throughput(&self) -> &[f64] {
        &self.throughput
    }

    pub fn collision_probability(&self) -> &[f64] {
        &self.collision_probability
    }

    /// Raw mean delay history; None marks slots before the first success.
    pub fn mean_delay_raw(&self) -> &[Option<f64>] {
        &self.mean_delay
    }

    /// Mean delay history with `sentinel` substituted for undefined slots.
    pub fn mean_delay(&self, sentinel: f64) -> Vec<f64> {
        self.mean_delay
            .iter()
            .map(|d| d.unwrap_or(sentinel))
            .collect()
    }

    /// Metrics recorded at position `index` (slot `index + 1`).
    pub fn at(&self, index: usize, sentinel: f64) -> Option<Metrics> {
        Some(Metrics {
            throughput: *self.throughput.get(index)?,
            mean_delay: self.mean_delay.get(index)?.unwrap_or(sentinel),
            traffic_offered: *self.offered_traffic.get(index)?,
            pckt_collision_prob: *self.collision_probability.get(index)?,
        })
    }

    /// Metrics at the last recorded slot.
    pub fn last(&self, sentinel: f64) -> Option<Metrics> {
        self.len().checked_sub(1).and_then(|i| self.at(i, sentinel))
    }
}
