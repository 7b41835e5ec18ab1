//! Per-source packet state and its transitions.
//!
//! A source holds at most one packet at a time. Its lifecycle is:
//!
//! ```text
//!            generate             succeed
//!   Idle ─────────────► Ready ─────────────► Idle
//!                        │ ▲
//!         collide/defer  │ │ tick (remaining reaches 0)
//!                        ▼ │
//!                    Backlogged
//! ```
//!
//! `since` is the slot the packet became ready; it survives backlog so
//! delay is measured from the first moment the packet existed.

use crate::Slot;

/// Where a source is in its packet lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// No packet in flight
    Idle,

    /// Will attempt transmission in the current slot
    Ready { since: Slot },

    /// Silent for `remaining` more slot boundaries, then Ready again
    Backlogged { remaining: u32, since: Slot },
}

/// One traffic-generating entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    state: SourceState,

    /// Backoff window drawn for the current packet, held in reserve
    /// until the packet collides or is deferred
    backoff: u32,
}

impl Default for Source {
    fn default() -> Self {
        Self::new()
    }
}

impl Source {
    /// Creates an idle source.
    pub fn new() -> Self {
        Self {
            state: SourceState::Idle,
            backoff: 0,
        }
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    pub fn backoff(&self) -> u32 {
        self.backoff
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SourceState::Idle)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SourceState::Ready { .. })
    }

    pub fn is_backlogged(&self) -> bool {
        matches!(self.state, SourceState::Backlogged { .. })
    }

    /// Slot at which the packet in flight became ready, if any.
    pub fn ready_since(&self) -> Option<Slot> {
        match self.state {
            SourceState::Idle => None,
            SourceState::Ready { since } | SourceState::Backlogged { since, .. } => Some(since),
        }
    }

    /// Gives an idle source a new packet at `slot`.
    ///
    /// Returns false (and changes nothing) if a packet is already in
    /// flight; a source never holds two packets.
    pub fn generate(&mut self, slot: Slot, backoff: u32) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.state = SourceState::Ready { since: slot };
        self.backoff = backoff;
        true
    }

    /// Replaces the reserved backoff of a ready source.
    pub fn redraw(&mut self, backoff: u32) {
        if self.is_ready() {
            self.backoff = backoff;
        }
    }

    /// Carrier sensed busy: hold off using the reserved backoff.
    ///
    /// The deferral slot's own countdown is part of the window, so the
    /// source attempts again `backoff - 1` slots later. With a backoff of
    /// 1 it stays Ready and attempts in this slot regardless.
    pub fn defer(&mut self) {
        if let SourceState::Ready { since } = self.state {
            if self.backoff > 1 {
                self.state = SourceState::Backlogged {
                    remaining: self.backoff - 1,
                    since,
                };
            }
        }
    }

    /// Attempt collided: stay silent for the reserved backoff.
    pub fn collide(&mut self) {
        if let SourceState::Ready { since } = self.state {
            self.state = SourceState::Backlogged {
                remaining: self.backoff.max(1),
                since,
            };
        }
    }

    /// Attempt succeeded at `slot`: the source goes idle.
    ///
    /// Returns the packet's delay (`slot - since`), or None if the source
    /// was not ready.
    pub fn succeed(&mut self, slot: Slot) -> Option<u64> {
        match self.state {
            SourceState::Ready { since } => {
                self.state = SourceState::Idle;
                Some(slot.saturating_sub(since))
            }
            _ => None,
        }
    }

    /// End-of-slot countdown.
    ///
    /// Backlogged sources lose one slot of backoff and turn Ready when it
    /// runs out. Idle and Ready sources are unaffected (every Ready source
    /// has already been resolved by the time the countdown runs).
    pub fn tick(&mut self) {
        if let SourceState::Backlogged { remaining, since } = self.state {
            self.state = match remaining.saturating_sub(1) {
                0 => SourceState::Ready { since },
                left => SourceState::Backlogged { remaining: left, since },
            };
        }
    }
}
