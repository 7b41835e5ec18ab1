use indicatif::{ProgressBar, ProgressStyle};
use slotsim_env::{Progress, SlotObserver};

/// Number of bar refreshes over a whole run.
const REFRESHES_PER_RUN: u64 = 200;

pub mod templates {
    pub const RUN: &str =
        "{prefix:>8} [{bar:30.cyan}] {percent}% ({pos}/{len} slots) {msg}";
    pub const SWEEP: &str =
        "   sweep [{bar:30.blue}] {percent}% ({pos}/{len} points) {msg}";
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
}

/// Terminal progress bar driven by the engine's slot notifications.
///
/// Redraws are throttled to a fixed slot stride so long runs are not
/// dominated by terminal output.
pub struct ProgressObserver {
    bar: ProgressBar,
    stride: u64,
}

impl ProgressObserver {
    /// Creates a visible bar for a run of `total_slots`.
    pub fn new(total_slots: u64, label: &str) -> Self {
        let bar = ProgressBar::new(total_slots);
        bar.set_style(style(templates::RUN));
        bar.set_prefix(label.to_string());
        Self::with_bar(bar, total_slots)
    }

    /// Creates a bar that never draws (for tests and non-terminal output).
    pub fn hidden(total_slots: u64) -> Self {
        Self::with_bar(ProgressBar::hidden(), total_slots)
    }

    fn with_bar(bar: ProgressBar, total_slots: u64) -> Self {
        bar.set_length(total_slots);
        Self {
            bar,
            stride: (total_slots / REFRESHES_PER_RUN).max(1),
        }
    }

    /// Current bar position.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    fn show(&self, progress: &Progress) {
        self.bar.set_position(progress.slots_completed);
        self.bar.set_message(format!(
            "attempts={} delivered={}",
            progress.attempts, progress.successes
        ));
    }
}

impl SlotObserver for ProgressObserver {
    fn on_slot(&mut self, progress: &Progress) {
        if progress.slots_completed % self.stride == 0
            || progress.slots_completed == progress.total_slots
        {
            self.show(progress);
        }
    }

    fn finish(&mut self, progress: &Progress, cancelled: bool) {
        self.show(progress);
        if cancelled {
            self.bar.abandon_with_message(format!(
                "cancelled at slot {}",
                progress.slots_completed
            ));
        } else {
            self.bar.finish();
        }
    }
}

/// Bar counting finished sweep points.
pub fn sweep_bar(points: u64) -> ProgressBar {
    let bar = ProgressBar::new(points);
    bar.set_style(style(templates::SWEEP));
    bar
}
