//! Traffic Generator stage.

use crate::channel::Channel;
use crate::params::SimParams;
use crate::source::Source;
use crate::Slot;
use slotsim_env::RandomSource;

/// Decides, per source per slot, whether a new packet becomes ready.
#[derive(Debug, Clone, Copy)]
pub struct TrafficGenerator {
    packet_ready_prob: f64,
    max_backoff: u32,
}

impl TrafficGenerator {
    pub fn new(params: &SimParams) -> Self {
        Self {
            packet_ready_prob: params.packet_ready_prob,
            max_backoff: params.max_backoff,
        }
    }

    /// Runs the stage over every source, in index order.
    ///
    /// - Idle sources draw once against `packet_ready_prob`; on a hit they
    ///   turn Ready at `slot` with a fresh backoff in reserve.
    /// - Sources already Ready (their backlog just ran out) keep the
    ///   backoff drawn with their packet, except under carrier sense with
    ///   the channel idle, where they refresh it before attempting.
    /// - Backlogged sources draw nothing.
    ///
    /// Returns the number of new packets.
    pub fn generate<R: RandomSource>(
        &self,
        sources: &mut [Source],
        slot: Slot,
        channel: &Channel,
        rng: &mut R,
    ) -> usize {
        let refresh = channel.is_sensed() && !channel.is_busy();
        let mut fresh = 0;
        for source in sources.iter_mut() {
            if source.is_idle() {
                if rng.chance(self.packet_ready_prob) {
                    let backoff = rng.backoff(self.max_backoff);
                    source.generate(slot, backoff);
                    fresh += 1;
                }
            } else if refresh && source.is_ready() {
                source.redraw(rng.backoff(self.max_backoff));
            }
        }
        fresh
    }
}
