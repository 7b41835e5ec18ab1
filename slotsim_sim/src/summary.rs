//! Human-readable summaries.
//!
//! Writers take any `io::Write`; the `print_*` wrappers target stdout and
//! only log a warning on failure, so a closed pipe never costs a result.

use crate::runner::SweepPoint;
use slotsim_core::theory;
use slotsim_core::{Protocol, RunReport};
use std::io::{self, Write};
use tracing::warn;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Writes the formatted summary of one run.
pub fn write_summary<W: Write>(out: &mut W, report: &RunReport) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", report)?;
    if report.counters.successes == 0 {
        writeln!(
            out,
            "  (no deliveries: mean delay shows the sentinel {})",
            report.delay_sentinel()
        )?;
    }
    if report.protocol == Protocol::Aloha {
        let offered = report.metrics.traffic_offered;
        writeln!(
            out,
            "ALOHA reference:   S = G*e^(-G) = {:.4} at G = {:.4}",
            theory::poisson_throughput(offered),
            offered,
        )?;
        writeln!(
            out,
            "                   S = {:.4} for {} sources sharing G",
            theory::finite_population_at_load(report.params.source_number, offered),
            report.params.source_number,
        )?;
        if let Some(stable) = theory::stable_load_for_throughput(report.metrics.throughput) {
            writeln!(out, "                   stable load for measured S: G = {:.4}", stable)?;
        }
    }
    writeln!(out, "{}", RULE)
}

/// Writes a side-by-side table of several runs.
pub fn write_comparison<W: Write>(out: &mut W, reports: &[RunReport]) -> io::Result<()> {
    writeln!(
        out,
        "{:<14} {:>10} {:>10} {:>10} {:>12}",
        "protocol", "S", "G", "Pc", "delay"
    )?;
    for r in reports {
        writeln!(
            out,
            "{:<14} {:>10.4} {:>10.4} {:>10.4} {:>12.2}",
            r.protocol.label(),
            r.metrics.throughput,
            r.metrics.traffic_offered,
            r.metrics.pckt_collision_prob,
            r.metrics.mean_delay,
        )?;
    }
    Ok(())
}

/// Writes a sweep table, one row per probability.
pub fn write_sweep<W: Write>(out: &mut W, points: &[SweepPoint]) -> io::Result<()> {
    writeln!(
        out,
        "{:>8} {:>10} {:>10} {:>10} {:>12} {:>10}",
        "p", "S", "G", "Pc", "delay", "G*e^-G"
    )?;
    for pt in points {
        writeln!(
            out,
            "{:>8.4} {:>10.4} {:>10.4} {:>10.4} {:>12.2} {:>10.4}",
            pt.packet_ready_prob,
            pt.metrics.throughput,
            pt.metrics.traffic_offered,
            pt.metrics.pckt_collision_prob,
            pt.metrics.mean_delay,
            pt.aloha_reference,
        )?;
    }
    Ok(())
}

pub fn print_summary(report: &RunReport) {
    if let Err(e) = write_summary(&mut io::stdout().lock(), report) {
        warn!("Failed to print summary: {}", e);
    }
}

pub fn print_comparison(reports: &[RunReport]) {
    if let Err(e) = write_comparison(&mut io::stdout().lock(), reports) {
        warn!("Failed to print comparison: {}", e);
    }
}

pub fn print_sweep(points: &[SweepPoint]) {
    if let Err(e) = write_sweep(&mut io::stdout().lock(), points) {
        warn!("Failed to print sweep: {}", e);
    }
}
