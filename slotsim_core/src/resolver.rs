//! Collision Resolver stage.

use crate::source::Source;
use crate::stats::RunCounters;
use crate::Slot;
use tracing::trace;

/// What happened on the channel in one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotOutcome {
    /// Nobody transmitted
    Silent,

    /// Exactly one attempt, delivered
    Success { source: usize, delay: u64 },

    /// Two or more attempts, all lost
    Collision { sources: Vec<usize> },
}

impl SlotOutcome {
    pub fn is_collision(&self) -> bool {
        matches!(self, SlotOutcome::Collision { .. })
    }
}

/// Resolves the slot's attempts and updates counters.
///
/// Outcome depends only on how many sources attempted, so the order of
/// `attempters` does not matter.
pub fn resolve(
    sources: &mut [Source],
    attempters: &[usize],
    slot: Slot,
    counters: &mut RunCounters,
) -> SlotOutcome {
    match attempters {
        [] => SlotOutcome::Silent,
        [winner] => {
            let winner = *winner;
            match sources[winner].succeed(slot) {
                Some(delay) => {
                    counters.record_success(delay);
                    trace!(slot, source = winner, delay, "success");
                    SlotOutcome::Success { source: winner, delay }
                }
                // Attempters are always Ready; nothing was sent otherwise.
                None => SlotOutcome::Silent,
            }
        }
        _ => {
            for &idx in attempters {
                sources[idx].collide();
            }
            counters.record_collision();
            trace!(slot, attempters = attempters.len(), "collision");
            SlotOutcome::Collision {
                sources: attempters.to_vec(),
            }
        }
    }
}

/// Shared end-of-slot backlog countdown over every source.
pub fn count_down(sources: &mut [Source]) {
    for source in sources.iter_mut() {
        source.tick();
    }
}
