//! Parameter configuration: JSON files plus command-line overrides.

use serde::Deserialize;
use slotsim_core::SimParams;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Errors loading a parameter file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be opened or read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid parameter document
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads `SimParams` from a JSON file.
///
/// Missing fields fall back to `SimParams::default()`. Values are not
/// validated here; the engine does that before running.
pub fn load_params(path: impl AsRef<Path>) -> Result<SimParams, ConfigError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Per-field overrides, typically from command-line flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ParamOverrides {
    pub source_number: Option<usize>,
    pub packet_ready_prob: Option<f64>,
    pub max_backoff: Option<u32>,
    pub simulation_time: Option<u64>,
}

impl ParamOverrides {
    /// Applies every set field on top of `base`.
    pub fn apply(&self, base: SimParams) -> SimParams {
        SimParams {
            source_number: self.source_number.unwrap_or(base.source_number),
            packet_ready_prob: self.packet_ready_prob.unwrap_or(base.packet_ready_prob),
            max_backoff: self.max_backoff.unwrap_or(base.max_backoff),
            simulation_time: self.simulation_time.unwrap_or(base.simulation_time),
        }
    }
}
