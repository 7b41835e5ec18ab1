//! Deterministic random source backed by ChaCha8.

use crate::RandomSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Random source derived entirely from a 64-bit seed.
///
/// Two sources built from the same seed (and stream) produce the same
/// sequence of draws, which is what makes runs replayable.
#[derive(Debug, Clone)]
pub struct SeededSource {
    /// Master seed for this source
    seed: u64,

    /// ChaCha stream selector (0 for the primary stream)
    stream: u64,

    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Creates a new source on the primary stream of `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_stream(seed, 0)
    }

    /// Creates a source on a specific ChaCha stream of `seed`.
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { seed, stream, rng }
    }

    /// Derives an independent, reproducible sub-source.
    ///
    /// Used to hand every run of a parameter sweep its own stream while
    /// keeping the whole sweep a function of the master seed.
    pub fn derive(&self, index: u64) -> Self {
        Self::with_stream(self.seed, index.wrapping_add(1))
    }

    /// Returns the stream this source draws from.
    pub fn stream(&self) -> u64 {
        self.stream
    }
}

impl RandomSource for SeededSource {
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn uniform_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high.max(low))
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = SeededSource::new(42);
        let mut b = SeededSource::new(42);

        for _ in 0..100 {
            assert_eq!(a.unit().to_bits(), b.unit().to_bits());
            assert_eq!(a.backoff(32), b.backoff(32));
        }
    }

    #[test]
    fn test_derived_streams_differ() {
        let master = SeededSource::new(42);
        let mut s1 = master.derive(0);
        let mut s2 = master.derive(1);

        let d1: Vec<u64> = (0..16).map(|_| s1.unit().to_bits()).collect();
        let d2: Vec<u64> = (0..16).map(|_| s2.unit().to_bits()).collect();
        assert_ne!(d1, d2);

        // Derivation itself is reproducible
        let mut again = master.derive(0);
        let d1_again: Vec<u64> = (0..16).map(|_| again.unit().to_bits()).collect();
        assert_eq!(d1, d1_again);
    }

    #[test]
    fn test_backoff_range() {
        let mut src = SeededSource::new(7);
        for _ in 0..1000 {
            let b = src.backoff(4);
            assert!((1..=4).contains(&b));
        }
        // A window of one is always one
        for _ in 0..10 {
            assert_eq!(src.backoff(1), 1);
        }
    }

    #[test]
    fn test_seed_reported() {
        let src = SeededSource::new(12345);
        assert_eq!(src.seed(), 12345);
        assert_eq!(src.stream(), 0);
    }
}
