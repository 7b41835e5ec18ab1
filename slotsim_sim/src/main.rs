//! slotsim CLI
//!
//! Simulate slotted ALOHA and CSMA/CA over a shared channel.

use anyhow::Context;
use clap::Parser;
use slotsim_core::{Protocol, SimParams};
use slotsim_env::CancelToken;
use slotsim_sim::logging::init_logging;
use slotsim_sim::summary::{print_comparison, print_summary, print_sweep};
use slotsim_sim::{load_params, probability_grid, resolve_protocol, ParamOverrides, Preset};
use slotsim_sim::{SeriesExport, SimRunner, SweepExport};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Slotted multiple-access simulator
#[derive(Parser, Debug)]
#[command(name = "slotsim")]
#[command(about = "Simulate slotted ALOHA and CSMA/CA over a shared channel", long_about = None)]
struct Args {
    /// Access protocol (aloha, csma_ca); overrides the preset's [default: aloha]
    #[arg(short, long)]
    protocol: Option<Protocol>,

    /// Named preset (single_source, guaranteed_collision, light_load, heavy_load, carrier_sense)
    #[arg(long)]
    preset: Option<Preset>,

    /// Load parameters from a JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of traffic sources
    #[arg(short = 'n', long)]
    sources: Option<usize>,

    /// Per-slot packet-ready probability of an idle source
    #[arg(short = 'q', long)]
    prob: Option<f64>,

    /// Maximum backoff window (slots)
    #[arg(short = 'b', long)]
    max_backoff: Option<u32>,

    /// Simulation time (slots)
    #[arg(short = 't', long)]
    time: Option<u64>,

    /// Master seed for determinism
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Draw randomness from the OS instead of the seed
    #[arg(long)]
    unseeded: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,

    /// Print a formatted summary
    #[arg(long)]
    nice: bool,

    /// JSON output for scripting
    #[arg(long)]
    json: bool,

    /// Export time series (or sweep table) to a JSON file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Run both protocols on the same seed
    #[arg(long)]
    compare: bool,

    /// Sweep packet-ready probability over N evenly spaced values in (0, 1]
    #[arg(long)]
    sweep: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let protocol = resolve_protocol(args.preset, args.protocol);
    let base = match args.preset {
        Some(preset) => {
            info!("Preset {}: {}", preset, preset.description());
            preset.params()
        }
        None => SimParams::default(),
    };
    let base = match &args.config {
        Some(path) => load_params(path).context("loading parameter file")?,
        None => base,
    };
    let params = ParamOverrides {
        source_number: args.sources,
        packet_ready_prob: args.prob,
        max_backoff: args.max_backoff,
        simulation_time: args.time,
    }
    .apply(base);

    if let Err(e) = params.validate() {
        error!("{}", e);
        std::process::exit(2);
    }

    // Ctrl+C stops the run at the next slot boundary
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("Could not install Ctrl-C handler: {}", e);
    }

    let runner = if args.unseeded {
        SimRunner::unseeded()
    } else {
        SimRunner::new(args.seed)
    }
    .with_progress(args.progress && !args.json)
    .with_cancel(cancel);
    let seed = runner.seed().unwrap_or(0);

    if let Some(steps) = args.sweep {
        let points = runner.sweep(protocol, params, &probability_grid(steps))?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&points)?);
        } else {
            print_sweep(&points);
        }
        if let Some(path) = &args.export {
            let export = SweepExport::new(protocol, seed, params, points);
            match export.write_to_file(path) {
                Ok(()) => info!("Exported sweep to {}", path.display()),
                Err(e) => error!("Failed to write export: {}", e),
            }
        }
        return Ok(());
    }

    let reports = if args.compare {
        runner.compare(params)?
    } else {
        vec![runner.run(protocol, params)?]
    };

    if args.json {
        let summary = serde_json::json!({
            "seed": seed,
            "params": params,
            "results": reports.iter().map(|r| {
                serde_json::json!({
                    "protocol": r.protocol,
                    "completed_slots": r.completed_slots,
                    "cancelled": r.cancelled,
                    "throughput": r.metrics.throughput,
                    "meanDelay": r.metrics.mean_delay,
                    "trafficOffered": r.metrics.traffic_offered,
                    "pcktCollisionProb": r.metrics.pckt_collision_prob,
                })
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if args.compare {
        print_comparison(&reports);
    } else if args.nice {
        for report in &reports {
            print_summary(report);
        }
    } else {
        for r in &reports {
            println!(
                "{} {} {} {}",
                r.metrics.throughput,
                r.metrics.mean_delay,
                r.metrics.traffic_offered,
                r.metrics.pckt_collision_prob
            );
        }
    }

    if let Some(path) = &args.export {
        for report in &reports {
            let target = if reports.len() > 1 {
                with_protocol_suffix(path, report.protocol)
            } else {
                path.clone()
            };
            match SeriesExport::from_report(report).write_to_file(&target) {
                Ok(()) => info!(
                    "Exported {} slots to {}",
                    report.completed_slots,
                    target.display()
                ),
                Err(e) => error!("Failed to write export: {}", e),
            }
        }
    }

    if reports.iter().any(|r| r.cancelled) {
        warn!("Run cancelled; results cover completed slots only");
    }
    Ok(())
}

/// `out.json` -> `out.aloha.json`
fn with_protocol_suffix(path: &std::path::Path, protocol: Protocol) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "series".to_string());
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "json".to_string());
    path.with_file_name(format!("{}.{}.{}", stem, protocol.name(), ext))
}
