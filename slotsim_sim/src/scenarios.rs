//! Named parameter presets.

use slotsim_core::{Protocol, SimParams};
use tracing::warn;

/// Preset identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// One saturated source: never collides, delivers every slot
    SingleSource,

    /// Two saturated sources, one slot: guaranteed collision
    GuaranteedCollision,

    /// Ten sources, light ALOHA load
    LightLoad,

    /// Ten sources, ALOHA load past the 1/e capacity
    HeavyLoad,

    /// Ten sources under CSMA/CA at moderate load
    CarrierSense,
}

impl Preset {
    /// Returns a list of all presets.
    pub fn all() -> Vec<Preset> {
        vec![
            Preset::SingleSource,
            Preset::GuaranteedCollision,
            Preset::LightLoad,
            Preset::HeavyLoad,
            Preset::CarrierSense,
        ]
    }

    /// Returns the preset name.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::SingleSource => "single_source",
            Preset::GuaranteedCollision => "guaranteed_collision",
            Preset::LightLoad => "light_load",
            Preset::HeavyLoad => "heavy_load",
            Preset::CarrierSense => "carrier_sense",
        }
    }

    /// Returns a description of the preset.
    pub fn description(&self) -> &'static str {
        match self {
            Preset::SingleSource => "1 source, p=1, max_backoff=4, 10 slots (ALOHA)",
            Preset::GuaranteedCollision => "2 sources, p=1, max_backoff=1, 1 slot (ALOHA)",
            Preset::LightLoad => "10 sources, p=0.01, max_backoff=16, 10000 slots (ALOHA)",
            Preset::HeavyLoad => "10 sources, p=0.2, max_backoff=16, 10000 slots (ALOHA)",
            Preset::CarrierSense => "10 sources, p=0.05, max_backoff=16, 10000 slots (CSMA/CA)",
        }
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            Preset::CarrierSense => Protocol::CsmaCa,
            _ => Protocol::Aloha,
        }
    }

    pub fn params(&self) -> SimParams {
        match self {
            Preset::SingleSource => SimParams::new(1, 1.0, 4, 10),
            Preset::GuaranteedCollision => SimParams::new(2, 1.0, 1, 1),
            Preset::LightLoad => SimParams::new(10, 0.01, 16, 10_000),
            Preset::HeavyLoad => SimParams::new(10, 0.2, 16, 10_000),
            Preset::CarrierSense => SimParams::new(10, 0.05, 16, 10_000),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "single_source" | "single" => Ok(Preset::SingleSource),
            "guaranteed_collision" | "collision" => Ok(Preset::GuaranteedCollision),
            "light_load" | "light" => Ok(Preset::LightLoad),
            "heavy_load" | "heavy" => Ok(Preset::HeavyLoad),
            "carrier_sense" | "csma" => Ok(Preset::CarrierSense),
            _ => Err(format!("Unknown preset: {}", s)),
        }
    }
}

/// Picks the protocol for a run. An explicit choice beats the preset's.
pub fn resolve_protocol(preset: Option<Preset>, explicit: Option<Protocol>) -> Protocol {
    match (preset, explicit) {
        (Some(preset), Some(protocol)) => {
            if protocol != preset.protocol() {
                warn!(
                    "Preset {} uses {}; running {} as requested",
                    preset,
                    preset.protocol().label(),
                    protocol.label()
                );
            }
            protocol
        }
        (Some(preset), None) => preset.protocol(),
        (None, protocol) => protocol.unwrap_or(Protocol::Aloha),
    }
}
