//! Run parameters and protocol selection.

use crate::error::ParamError;
use serde::{Deserialize, Serialize};

/// Caller-supplied parameters for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Number of traffic sources (fixed for the run)
    pub source_number: usize,

    /// Per-slot probability that an idle source gets a new packet
    pub packet_ready_prob: f64,

    /// Upper bound of the uniform backoff window `1..=max_backoff`
    pub max_backoff: u32,

    /// Number of slots to simulate
    pub simulation_time: u64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            source_number: 10,
            packet_ready_prob: 0.05,
            max_backoff: 16,
            simulation_time: 10_000,
        }
    }
}

impl SimParams {
    /// Creates a parameter set.
    pub fn new(
        source_number: usize,
        packet_ready_prob: f64,
        max_backoff: u32,
        simulation_time: u64,
    ) -> Self {
        Self {
            source_number,
            packet_ready_prob,
            max_backoff,
            simulation_time,
        }
    }

    /// Returns a copy with a different packet-ready probability.
    pub fn with_probability(mut self, packet_ready_prob: f64) -> Self {
        self.packet_ready_prob = packet_ready_prob;
        self
    }

    /// Returns a copy with a different simulation time.
    pub fn with_duration(mut self, simulation_time: u64) -> Self {
        self.simulation_time = simulation_time;
        self
    }

    /// Checks every parameter; the first violation wins.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.source_number < 1 {
            return Err(ParamError::InvalidSourceCount(self.source_number));
        }
        if !(0.0..=1.0).contains(&self.packet_ready_prob) {
            return Err(ParamError::InvalidProbability(self.packet_ready_prob));
        }
        if self.simulation_time < 1 {
            return Err(ParamError::duration("simulation_time", self.simulation_time));
        }
        if self.max_backoff < 1 {
            return Err(ParamError::duration("max_backoff", u64::from(self.max_backoff)));
        }
        Ok(())
    }
}

/// Access discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// Slotted ALOHA: transmit as soon as ready
    Aloha,

    /// CSMA/CA: defer while the channel is sensed busy
    CsmaCa,
}

impl Protocol {
    /// Returns both protocols.
    pub fn all() -> Vec<Protocol> {
        vec![Protocol::Aloha, Protocol::CsmaCa]
    }

    /// Returns the short protocol name.
    pub fn name(&self) -> &'static str {
        match self {
            Protocol::Aloha => "aloha",
            Protocol::CsmaCa => "csma_ca",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Aloha => "slotted ALOHA",
            Protocol::CsmaCa => "CSMA/CA",
        }
    }

    /// Whether sources observe the busy/idle channel before attempting.
    pub fn senses_carrier(&self) -> bool {
        matches!(self, Protocol::CsmaCa)
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aloha" | "slotted_aloha" | "s-aloha" => Ok(Protocol::Aloha),
            "csma" | "csma_ca" | "csma/ca" | "csmaca" => Ok(Protocol::CsmaCa),
            _ => Err(format!("Unknown protocol: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        assert!(SimParams::default().validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let base = SimParams::new(2, 0.5, 4, 100);

        let p = SimParams { source_number: 0, ..base };
        assert_eq!(p.validate(), Err(ParamError::InvalidSourceCount(0)));

        let p = base.with_probability(1.5);
        assert_eq!(p.validate(), Err(ParamError::InvalidProbability(1.5)));

        let p = base.with_probability(-0.1);
        assert!(matches!(p.validate(), Err(ParamError::InvalidProbability(_))));

        let p = base.with_probability(f64::NAN);
        assert!(matches!(p.validate(), Err(ParamError::InvalidProbability(_))));

        let p = base.with_duration(0);
        assert_eq!(
            p.validate(),
            Err(ParamError::duration("simulation_time", 0))
        );

        let p = SimParams { max_backoff: 0, ..base };
        assert_eq!(p.validate(), Err(ParamError::duration("max_backoff", 0)));
    }

    #[test]
    fn test_probability_bounds_inclusive() {
        let base = SimParams::new(1, 0.0, 1, 1);
        assert!(base.validate().is_ok());
        assert!(base.with_probability(1.0).validate().is_ok());
    }

    #[test]
    fn test_protocol_parse() {
        assert_eq!("aloha".parse::<Protocol>(), Ok(Protocol::Aloha));
        assert_eq!("CSMA/CA".parse::<Protocol>(), Ok(Protocol::CsmaCa));
        assert_eq!("csma_ca".parse::<Protocol>(), Ok(Protocol::CsmaCa));
        assert!("tdma".parse::<Protocol>().is_err());
    }

    #[test]
    fn test_protocol_carrier_sense() {
        assert!(!Protocol::Aloha.senses_carrier());
        assert!(Protocol::CsmaCa.senses_carrier());
        assert_eq!(Protocol::CsmaCa.to_string(), "csma_ca");
    }
}
