//! The randomness seam used by the slot engine.

/// Source of every random draw made during a run.
///
/// The engine never touches a global RNG; it is handed one of these and
/// draws from it in a fixed order, so two sources producing the same
/// stream yield identical runs.
///
/// # Implementations
///
/// - **Reproducible**: `SeededSource` - ChaCha8 seeded from a `u64`
/// - **Ad hoc**: `EntropySource` - `StdRng` seeded from the OS
pub trait RandomSource {
    /// Returns a uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Returns a uniform integer in `low..=high`.
    fn uniform_inclusive(&mut self, low: u32, high: u32) -> u32;

    /// Returns the seed this source was built from (0 when unseeded).
    fn seed(&self) -> u64;

    /// Draws one uniform value and reports whether it is `<= p`.
    ///
    /// Exactly one value is consumed regardless of `p`. A probability of
    /// zero never fires.
    fn chance(&mut self, p: f64) -> bool {
        let u = self.unit();
        p > 0.0 && u <= p
    }

    /// Draws a backoff window uniformly from `1..=max`.
    fn backoff(&mut self, max: u32) -> u32 {
        self.uniform_inclusive(1, max.max(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }

    fn uniform_inclusive(&mut self, low: u32, high: u32) -> u32 {
        (**self).uniform_inclusive(low, high)
    }

    fn seed(&self) -> u64 {
        (**self).seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed script of unit values.
    struct Scripted {
        units: Vec<f64>,
        next: usize,
    }

    impl RandomSource for Scripted {
        fn unit(&mut self) -> f64 {
            let u = self.units[self.next % self.units.len()];
            self.next += 1;
            u
        }

        fn uniform_inclusive(&mut self, low: u32, _high: u32) -> u32 {
            low
        }

        fn seed(&self) -> u64 {
            0
        }
    }

    #[test]
    fn test_chance_zero_never_fires() {
        let mut src = Scripted { units: vec![0.0], next: 0 };
        assert!(!src.chance(0.0));
        // The draw is still consumed
        assert_eq!(src.next, 1);
    }

    #[test]
    fn test_chance_is_inclusive() {
        let mut src = Scripted { units: vec![0.25], next: 0 };
        assert!(src.chance(0.25));
        assert!(!src.chance(0.2));
    }

    #[test]
    fn test_backoff_clamps_zero_max() {
        let mut src = Scripted { units: vec![0.5], next: 0 };
        assert_eq!(src.backoff(0), 1);
    }
}
