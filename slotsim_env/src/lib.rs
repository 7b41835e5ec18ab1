//! slotsim Environment Abstraction Layer
//!
//! This crate isolates everything the slot engine needs from the outside
//! world, so the engine itself stays headless and deterministic:
//! - Randomness (`RandomSource`): seeded ChaCha8 streams for reproducible
//!   runs, OS entropy otherwise
//! - Cancellation (`CancelToken`): a cooperative stop request checked once
//!   per slot boundary
//! - Progress (`SlotObserver`): per-slot notifications for whatever UI is
//!   layered on top
//!
//! By deriving all entropy from a single 64-bit seed, any run can be
//! replayed bit-for-bit from its seed number.
//!
//! # Example
//!
//! ```
//! use slotsim_env::{RandomSource, SeededSource};
//!
//! let mut a = SeededSource::new(7);
//! let mut b = SeededSource::new(7);
//! assert_eq!(a.backoff(16), b.backoff(16));
//! ```

mod cancel;
mod entropy;
mod observer;
mod random;
mod seeded;

pub use cancel::CancelToken;
pub use entropy::EntropySource;
pub use observer::{NullObserver, Progress, SlotObserver};
pub use random::RandomSource;
pub use seeded::SeededSource;
