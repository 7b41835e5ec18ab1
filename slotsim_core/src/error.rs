//! Input validation errors.

use thiserror::Error;

/// Reasons a run is refused before any slot is simulated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Fewer than one traffic source
    #[error("Invalid source count: {0} (need at least one source)")]
    InvalidSourceCount(usize),

    /// Packet-ready probability outside [0, 1] (or NaN)
    #[error("Invalid probability: {0} (must lie in [0, 1])")]
    InvalidProbability(f64),

    /// Non-positive simulation time or backoff window
    #[error("Invalid duration: {field} = {value} (must be at least 1)")]
    InvalidDuration { field: &'static str, value: u64 },
}

impl ParamError {
    /// Creates a duration error for the named parameter.
    pub fn duration(field: &'static str, value: u64) -> Self {
        Self::InvalidDuration { field, value }
    }
}
