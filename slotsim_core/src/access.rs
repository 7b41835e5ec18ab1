//! Access Controller stage.

use crate::channel::Channel;
use crate::source::Source;
use crate::stats::RunCounters;

/// Picks the sources that transmit this slot.
///
/// The only protocol-specific gate lives here: with carrier sense, ready
/// sources that see the channel busy defer instead of attempting. A
/// source whose reserved backoff is 1 has nothing to defer by and
/// attempts anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessController;

impl AccessController {
    pub fn new() -> Self {
        Self
    }

    /// Returns the attempters (indices of Ready sources) and adds them to
    /// the cumulative attempt counter.
    pub fn select(
        &self,
        sources: &mut [Source],
        channel: &Channel,
        counters: &mut RunCounters,
    ) -> Vec<usize> {
        if channel.is_busy() {
            for source in sources.iter_mut().filter(|s| s.is_ready()) {
                source.defer();
            }
        }

        let attempters: Vec<usize> = sources
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_ready())
            .map(|(idx, _)| idx)
            .collect();

        counters.record_attempts(attempters.len() as u64);
        attempters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Protocol;
    use crate::resolver::SlotOutcome;
    use crate::source::SourceState;

    fn ready_sources(n: usize) -> Vec<Source> {
        let mut sources = vec![Source::new(); n];
        for s in sources.iter_mut() {
            s.generate(1, 2);
        }
        sources
    }

    #[test]
    fn test_all_ready_sources_attempt() {
        let mut sources = ready_sources(3);
        sources[1].collide();
        let mut counters = RunCounters::default();

        let attempters = AccessController::new().select(
            &mut sources,
            &Channel::new(Protocol::Aloha),
            &mut counters,
        );

        assert_eq!(attempters, vec![0, 2]);
        assert_eq!(counters.attempts, 2);
    }

    #[test]
    fn test_busy_channel_defers_ready_sources() {
        let mut sources = ready_sources(2);
        let mut channel = Channel::new(Protocol::CsmaCa);
        channel.settle(&SlotOutcome::Success { source: 0, delay: 0 });
        let mut counters = RunCounters::default();

        let attempters = AccessController::new().select(&mut sources, &channel, &mut counters);

        assert!(attempters.is_empty());
        assert_eq!(counters.attempts, 0);
        for s in &sources {
            assert_eq!(s.state(), SourceState::Backlogged { remaining: 1, since: 1 });
        }
    }

    #[test]
    fn test_unit_backoff_attempts_through_busy_channel() {
        let mut sources = ready_sources(2);
        sources[1].redraw(1);
        let mut channel = Channel::new(Protocol::CsmaCa);
        channel.settle(&SlotOutcome::Success { source: 0, delay: 0 });
        let mut counters = RunCounters::default();

        let attempters = AccessController::new().select(&mut sources, &channel, &mut counters);

        assert_eq!(attempters, vec![1]);
        assert_eq!(counters.attempts, 1);
        assert!(sources[0].is_backlogged());
    }
}
