//! JSON exporter for external plotting.
//!
//! Writes the four metric series (or a sweep table) so a plotting tool
//! can consume them without linking against the engine.

use crate::runner::SweepPoint;
use serde::{Deserialize, Serialize};
use slotsim_core::{Metrics, Protocol, RunReport, SimParams, TimeSeries};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Complete time-series export of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesExport {
    pub protocol: Protocol,

    /// Seed used (0 when unseeded)
    pub seed: u64,

    pub params: SimParams,
    pub completed_slots: u64,
    pub cancelled: bool,

    /// Mean delay written for slots before the first success
    pub delay_sentinel: f64,

    /// Final-slot metrics
    pub metrics: Metrics,

    /// One entry per completed slot
    pub series: TimeSeries,
}

impl SeriesExport {
    pub fn from_report(report: &RunReport) -> Self {
        Self {
            protocol: report.protocol,
            seed: report.seed,
            params: report.params,
            completed_slots: report.completed_slots,
            cancelled: report.cancelled,
            delay_sentinel: report.delay_sentinel(),
            metrics: report.metrics,
            series: report.time_series(),
        }
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        write_json(self, path)
    }

    /// Reads an export back.
    pub fn read_from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Export of a packet-ready-probability sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepExport {
    pub protocol: Protocol,

    /// Master seed (0 when unseeded)
    pub seed: u64,

    /// Parameters shared by every point (probability varies)
    pub base_params: SimParams,

    pub points: Vec<SweepPoint>,
}

impl SweepExport {
    pub fn new(protocol: Protocol, seed: u64, base_params: SimParams, points: Vec<SweepPoint>) -> Self {
        Self {
            protocol,
            seed,
            base_params,
            points,
        }
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        write_json(self, path)
    }
}

fn write_json<T: Serialize>(value: &T, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimRunner;

    #[test]
    fn test_series_export_round_trip_file() {
        let report = SimRunner::new(5)
            .run(Protocol::CsmaCa, SimParams::new(3, 0.3, 4, 25))
            .unwrap();
        let export = SeriesExport::from_report(&report);
        assert_eq!(export.series.len(), 25);
        assert_eq!(export.delay_sentinel, 25.0);

        let path = std::env::temp_dir().join(format!("slotsim_export_{}.json", std::process::id()));
        export.write_to_file(&path).unwrap();
        let back = SeriesExport::read_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(back.protocol, Protocol::CsmaCa);
        assert_eq!(back.series.throughput.len(), 25);
        assert_eq!(back.completed_slots, 25);
    }

    #[test]
    fn test_export_uses_snake_case_protocol() {
        let report = SimRunner::new(5)
            .run(Protocol::CsmaCa, SimParams::new(1, 0.0, 1, 2))
            .unwrap();
        let json = serde_json::to_string(&SeriesExport::from_report(&report)).unwrap();
        assert!(json.contains("\"protocol\":\"csma_ca\""));
        assert!(json.contains("\"pckt_collision_prob\""));
    }
}
