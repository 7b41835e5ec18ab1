//! Progress notifications emitted by the engine.

/// Snapshot handed to observers after each completed slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Slots fully processed so far
    pub slots_completed: u64,

    /// Slots the run was configured for
    pub total_slots: u64,

    /// Cumulative transmission attempts
    pub attempts: u64,

    /// Cumulative successful transmissions
    pub successes: u64,
}

impl Progress {
    /// Fraction of the run completed, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total_slots == 0 {
            return 1.0;
        }
        self.slots_completed as f64 / self.total_slots as f64
    }
}

/// Receives per-slot progress from a running engine.
///
/// Observers must not influence the simulation; they only see counters.
/// Cancellation goes through `CancelToken`, never through this trait.
pub trait SlotObserver {
    /// Called after every completed slot.
    fn on_slot(&mut self, progress: &Progress);

    /// Called once when the run stops, whether it completed or was cancelled.
    fn finish(&mut self, _progress: &Progress, _cancelled: bool) {}
}

impl<O: SlotObserver + ?Sized> SlotObserver for &mut O {
    fn on_slot(&mut self, progress: &Progress) {
        (**self).on_slot(progress)
    }

    fn finish(&mut self, progress: &Progress, cancelled: bool) {
        (**self).finish(progress, cancelled)
    }
}

/// Observer that ignores everything (headless runs).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SlotObserver for NullObserver {
    fn on_slot(&mut self, _progress: &Progress) {}
}
