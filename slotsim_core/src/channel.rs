//! Carrier-sense state of the shared channel.

use crate::params::Protocol;
use crate::resolver::SlotOutcome;

/// The shared medium as seen by carrier-sensing sources.
///
/// Busy for exactly the slot after a successful transmission. Without
/// carrier sense the channel always reads idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    sensing: bool,
    busy: bool,
}

impl Channel {
    /// Creates an idle channel with the protocol's sensing capability.
    pub fn new(protocol: Protocol) -> Self {
        Self {
            sensing: protocol.senses_carrier(),
            busy: false,
        }
    }

    /// Whether sources can observe this channel.
    pub fn is_sensed(&self) -> bool {
        self.sensing
    }

    /// Busy signal left by the previous slot.
    pub fn is_busy(&self) -> bool {
        self.sensing && self.busy
    }

    /// Updates the busy signal from this slot's outcome.
    ///
    /// A success holds the channel for the next slot; silence and
    /// collisions leave it free.
    pub fn settle(&mut self, outcome: &SlotOutcome) {
        self.busy = self.sensing && matches!(outcome, SlotOutcome::Success { .. });
    }
}
