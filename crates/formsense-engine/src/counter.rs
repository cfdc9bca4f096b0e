//! Debounced repetition counting.

use std::time::Duration;

use formsense_core::{Resettable, Timestamp};

/// Default debounce window for the graded deployment variant.
pub const DEFAULT_GRADED_DEBOUNCE: Duration = Duration::from_millis(1000);
/// Default debounce window for the binary deployment variant.
pub const DEFAULT_BINARY_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Outcome of feeding one frame's status to the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOutcome {
    /// The count did not change
    Unchanged,
    /// The count was incremented by one
    Incremented,
}

/// Debounced event counter for completed repetitions.
///
/// The count increments by exactly one when a full-success status arrives
/// and the elapsed time since the last accepted repetition strictly exceeds
/// the debounce window. The count is monotonic: no decrement operation
/// exists, only [`reset`](Resettable::reset) on an exercise switch.
#[derive(Debug, Clone)]
pub struct RepCounter {
    count: u32,
    last_accepted: Option<Timestamp>,
    window: Duration,
}

impl RepCounter {
    /// Creates a counter with the given debounce window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            count: 0,
            last_accepted: None,
            window,
        }
    }

    /// Feeds one frame's status to the counter.
    ///
    /// `qualifies` must be `true` only for the full-success statuses
    /// (Perfect / Correct). The first qualifying frame after a reset counts
    /// immediately; subsequent ones must clear the debounce window.
    pub fn observe(&mut self, qualifies: bool, at: Timestamp) -> CountOutcome {
        if !qualifies {
            return CountOutcome::Unchanged;
        }

        let gap_elapsed = match self.last_accepted {
            None => true,
            Some(last) => at.duration_since(last) > self.window,
        };

        if !gap_elapsed {
            return CountOutcome::Unchanged;
        }

        self.count += 1;
        self.last_accepted = Some(at);
        CountOutcome::Incremented
    }

    /// Returns the current repetition count.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns the debounce window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Resettable for RepCounter {
    fn reset(&mut self) {
        // The debounce timestamp is cleared together with the count so a
        // fresh exercise starts with no carried-over gap requirement.
        self.count = 0;
        self.last_accepted = None;
    }
}
