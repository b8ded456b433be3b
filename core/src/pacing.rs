//! Timing rules for batched probing.
//!
//! A run lasts `total` wall-clock time; no batch may *start* once that has
//! elapsed, though a batch already in flight is always allowed to finish.
//! Consecutive batch starts are at least `min_spacing` apart.

use std::time::Duration;

pub const DEFAULT_TOTAL_DURATION: Duration = Duration::from_secs(300);
pub const DEFAULT_MIN_SPACING: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchPacer {
    total: Duration,
    min_spacing: Duration,
}

impl Default for BatchPacer {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_DURATION, DEFAULT_MIN_SPACING)
    }
}

impl BatchPacer {
    pub fn new(total: Duration, min_spacing: Duration) -> Self {
        Self { total, min_spacing }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn min_spacing(&self) -> Duration {
        self.min_spacing
    }

    /// Whether a new batch may begin `elapsed` into the run.
    pub fn may_start(&self, elapsed: Duration) -> bool {
        elapsed < self.total
    }

    /// How long to sleep after a batch that took `batch_elapsed`.
    pub fn padding(&self, batch_elapsed: Duration) -> Option<Duration> {
        self.min_spacing
            .checked_sub(batch_elapsed)
            .filter(|pad| !pad.is_zero())
    }
}
