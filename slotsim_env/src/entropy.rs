//! Non-reproducible random source seeded from the operating system.

use crate::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source seeded from OS entropy.
///
/// For ad hoc runs where reproducibility does not matter. `seed()`
/// returns 0 since there is no seed to report.
#[derive(Debug, Clone)]
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    /// Creates a new EntropySource.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn uniform_inclusive(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high.max(low))
    }

    fn seed(&self) -> u64 {
        0
    }
}
