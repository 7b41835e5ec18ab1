//! slotsim Runner
//!
//! Thin layers over `slotsim_core` that turn single engine runs into
//! something a person can drive:
//! - **Runner**: seeded single runs, protocol comparisons and parallel
//!   parameter sweeps (each sweep point owns an independent RNG stream)
//! - **Progress**: indicatif bar fed by the engine's slot observer
//! - **Summary / Export**: text summaries and JSON time series for plotting
//! - **Scenarios**: named parameter presets
//!
//! None of these layers can change a result: a failing progress bar,
//! summary or export leaves the returned `RunReport` intact.
//!
//! # Usage
//!
//! ```
//! use slotsim_sim::SimRunner;
//! use slotsim_core::{Protocol, SimParams};
//!
//! let runner = SimRunner::new(42);
//! let report = runner.run(Protocol::Aloha, SimParams::new(4, 0.1, 8, 500)).unwrap();
//! assert_eq!(report.completed_slots, 500);
//! ```

pub mod config;
pub mod exporter;
pub mod logging;
pub mod progress;
pub mod runner;
pub mod scenarios;
pub mod summary;

pub use config::{load_params, ConfigError, ParamOverrides};
pub use exporter::{SeriesExport, SweepExport};
pub use progress::ProgressObserver;
pub use runner::{probability_grid, SimRunner, SweepPoint};
pub use scenarios::{resolve_protocol, Preset};
