//! Temporal smoothing of joint angle samples.
//!
//! A live estimator jitters from frame to frame; averaging the last few
//! samples steadies the signal before it is graded. Each tracked signal gets
//! its own window so that sides and exercises never contaminate each other.

use std::collections::{HashMap, VecDeque};

use formsense_core::{ExerciseKind, Resettable, Side};

/// Default smoothing window capacity.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 10;

/// Bounded sliding-window average over a sequence of angle samples.
#[derive(Debug, Clone)]
pub struct AngleSmoother {
    window: VecDeque<f32>,
    capacity: usize,
}

impl AngleSmoother {
    /// Creates a smoother holding at most `capacity` samples.
    ///
    /// A capacity of zero is treated as one, so the smoother always returns
    /// the sample it was just given.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a sample, evicting the oldest once capacity is exceeded, and
    /// returns the arithmetic mean of the current window contents.
    pub fn push(&mut self, angle: f32) -> f32 {
        self.window.push_back(angle);
        if self.window.len() > self.capacity {
            self.window.pop_front();
        }
        self.window.iter().sum::<f32>() / self.window.len() as f32
    }

    /// Returns the arithmetic mean of the current window, if non-empty.
    #[must_use]
    pub fn mean(&self) -> Option<f32> {
        if self.window.is_empty() {
            None
        } else {
            Some(self.window.iter().sum::<f32>() / self.window.len() as f32)
        }
    }

    /// Returns the number of buffered samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Returns `true` if no samples are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Returns the window capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Resettable for AngleSmoother {
    fn reset(&mut self) {
        self.window.clear();
    }
}

/// Keyed collection of independent smoothing windows.
///
/// One window per `(exercise, side)` signal, created lazily on first use.
/// Keeping the windows separate prevents cross-contamination when sides or
/// exercises change mid-session.
#[derive(Debug)]
pub struct SmootherBank {
    capacity: usize,
    smoothers: HashMap<(ExerciseKind, Side), AngleSmoother>,
}

impl SmootherBank {
    /// Creates a bank whose windows hold at most `capacity` samples each.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            smoothers: HashMap::new(),
        }
    }

    /// Pushes a sample through the window for the given signal and returns
    /// the smoothed angle.
    pub fn smooth(&mut self, exercise: ExerciseKind, side: Side, angle: f32) -> f32 {
        self.smoothers
            .entry((exercise, side))
            .or_insert_with(|| AngleSmoother::new(self.capacity))
            .push(angle)
    }

    /// Returns the window for a signal, if one exists yet.
    #[must_use]
    pub fn smoother(&self, exercise: ExerciseKind, side: Side) -> Option<&AngleSmoother> {
        self.smoothers.get(&(exercise, side))
    }
}

impl Resettable for SmootherBank {
    fn reset(&mut self) {
        self.smoothers.clear();
    }
}
