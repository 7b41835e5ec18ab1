//! slotsim Core - Slotted Multiple-Access Simulation Engine
//!
//! Estimates steady-state performance of random access over one shared,
//! slotted channel. Two disciplines share a single engine:
//! 1. **Slotted ALOHA**: every ready source transmits immediately
//! 2. **CSMA/CA**: ready sources additionally defer while the channel is
//!    marked busy by the previous slot's successful transmission
//!
//! Each slot runs four stages in a fixed order:
//!
//! ```text
//! Traffic Generator -> Access Controller -> Collision Resolver -> Statistics
//! ```
//!
//! # Usage
//!
//! ```
//! use slotsim_core::{simulate, Protocol, SimParams};
//! use slotsim_env::SeededSource;
//!
//! let params = SimParams::new(1, 1.0, 4, 10);
//! let report = simulate(params, Protocol::Aloha, SeededSource::new(42)).unwrap();
//! assert_eq!(report.metrics.throughput, 1.0);
//! ```

pub mod access;
pub mod channel;
pub mod engine;
pub mod error;
pub mod params;
pub mod report;
pub mod resolver;
pub mod source;
pub mod stats;
pub mod theory;
pub mod traffic;

/// Discrete simulated time, 1-indexed.
pub type Slot = u64;

// Re-export key types for convenience
pub use engine::{simulate, Engine};
pub use error::ParamError;
pub use params::{Protocol, SimParams};
pub use report::{RunReport, TimeSeries};
pub use resolver::SlotOutcome;
pub use source::{Source, SourceState};
pub use stats::{Metrics, RunCounters};
