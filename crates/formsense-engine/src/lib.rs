//! # FormSense Engine
//!
//! Exercise form evaluation and repetition counting from a live stream of 2D
//! body-keypoint observations.
//!
//! The engine turns noisy per-frame joint-position estimates into a
//! temporally smoothed joint angle, a per-exercise qualitative
//! classification, and a debounced, monotonic repetition count with user
//! feedback. It is single-person, single-exercise-at-a-time, and stateless
//! across process restarts.
//!
//! ## Pipeline
//!
//! ```text
//! raw keypoints → angle(s) → smoothed angle → classification
//!                                        → counted event → emitted feedback
//! ```
//!
//! - [`geometry`]: three 2D points → one angle in degrees
//! - [`smoothing`]: bounded sliding-window average, one window per signal
//! - [`evaluation`]: fixed per-exercise angle bands → qualitative status
//! - [`counter`]: debounced, monotonic repetition counting
//! - [`session`]: the per-frame orchestration cycle
//! - [`runner`]: a cancellable processing loop over an async estimator
//!
//! ## Example
//!
//! ```rust
//! use formsense_core::{BodyPart, Confidence, ExerciseKind, Keypoint, PoseFrame, Timestamp};
//! use formsense_engine::{EngineConfig, SessionEngine};
//!
//! let config = EngineConfig::builder()
//!     .exercise(ExerciseKind::ShoulderPress)
//!     .build();
//! let mut engine = SessionEngine::new(config);
//!
//! // A frame with the left arm pressed straight overhead.
//! let confidence = Confidence::new(0.9).unwrap();
//! let frame = PoseFrame::from_keypoints(
//!     Timestamp::from_millis(0),
//!     [
//!         Keypoint::new(BodyPart::LeftShoulder, 100.0, 200.0, confidence),
//!         Keypoint::new(BodyPart::LeftElbow, 100.0, 120.0, confidence),
//!         Keypoint::new(BodyPart::LeftWrist, 100.0, 40.0, confidence),
//!     ],
//! );
//!
//! let output = engine.process_frame(&frame).expect("frame should process");
//! assert_eq!(output.rep_count, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod counter;
pub mod evaluation;
pub mod geometry;
pub mod runner;
pub mod session;
pub mod smoothing;

pub use counter::{CountOutcome, RepCounter, DEFAULT_BINARY_DEBOUNCE, DEFAULT_GRADED_DEBOUNCE};
pub use evaluation::{EvaluationMode, FormEvaluator};
pub use geometry::joint_angle;
pub use runner::{RunnerConfig, RunnerHandle, SessionRunner, SessionStats};
pub use session::{RepPolicy, SessionEngine};
pub use smoothing::{AngleSmoother, SmootherBank, DEFAULT_SMOOTHING_WINDOW};

use std::time::Duration;

use formsense_core::{ExerciseKind, DEFAULT_CONFIDENCE_THRESHOLD};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for a [`SessionEngine`].
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// The initially selected exercise
    pub exercise: ExerciseKind,
    /// Deployment variant for evaluation results
    pub mode: EvaluationMode,
    /// Counting policy for bilateral evaluations
    pub rep_policy: RepPolicy,
    /// Confidence a landmark must strictly exceed to be usable
    pub confidence_threshold: f32,
    /// Smoothing window capacity, in samples
    pub smoothing_window: usize,
    /// Minimum gap between two counted repetitions
    pub debounce_window: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exercise: ExerciseKind::Squat,
            mode: EvaluationMode::Graded,
            rep_policy: RepPolicy::FirstQualifyingSide,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            debounce_window: DEFAULT_GRADED_DEBOUNCE,
        }
    }
}

impl EngineConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for [`EngineConfig`].
///
/// When no debounce window is set explicitly, the variant default applies:
/// 1000 ms for the graded variant, 2000 ms for the binary one.
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    exercise: Option<ExerciseKind>,
    mode: Option<EvaluationMode>,
    rep_policy: Option<RepPolicy>,
    confidence_threshold: Option<f32>,
    smoothing_window: Option<usize>,
    debounce_window: Option<Duration>,
}

impl EngineConfigBuilder {
    /// Sets the initially selected exercise.
    #[must_use]
    pub fn exercise(mut self, exercise: ExerciseKind) -> Self {
        self.exercise = Some(exercise);
        self
    }

    /// Sets the evaluation deployment variant.
    #[must_use]
    pub fn mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the counting policy for bilateral evaluations.
    #[must_use]
    pub fn rep_policy(mut self, policy: RepPolicy) -> Self {
        self.rep_policy = Some(policy);
        self
    }

    /// Sets the usable confidence threshold, clamped into [0, 1].
    #[must_use]
    pub fn confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = Some(threshold.clamp(0.0, 1.0));
        self
    }

    /// Sets the smoothing window capacity; zero is treated as one.
    #[must_use]
    pub fn smoothing_window(mut self, capacity: usize) -> Self {
        self.smoothing_window = Some(capacity.max(1));
        self
    }

    /// Sets the debounce window between counted repetitions.
    #[must_use]
    pub fn debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = Some(window);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> EngineConfig {
        let mode = self.mode.unwrap_or_default();
        let debounce_window = self.debounce_window.unwrap_or(match mode {
            EvaluationMode::Graded => DEFAULT_GRADED_DEBOUNCE,
            EvaluationMode::Binary => DEFAULT_BINARY_DEBOUNCE,
        });
        EngineConfig {
            exercise: self.exercise.unwrap_or(ExerciseKind::Squat),
            mode,
            rep_policy: self.rep_policy.unwrap_or_default(),
            confidence_threshold: self
                .confidence_threshold
                .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD),
            smoothing_window: self.smoothing_window.unwrap_or(DEFAULT_SMOOTHING_WINDOW),
            debounce_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.exercise, ExerciseKind::Squat);
        assert_eq!(config.mode, EvaluationMode::Graded);
        assert_eq!(config.debounce_window, DEFAULT_GRADED_DEBOUNCE);
        assert_eq!(config.smoothing_window, 10);
    }

    #[test]
    fn test_builder_variant_default_debounce() {
        let graded = EngineConfig::builder().build();
        assert_eq!(graded.debounce_window, Duration::from_millis(1000));

        let binary = EngineConfig::builder().mode(EvaluationMode::Binary).build();
        assert_eq!(binary.debounce_window, Duration::from_millis(2000));

        // An explicit window wins over the variant default.
        let custom = EngineConfig::builder()
            .mode(EvaluationMode::Binary)
            .debounce_window(Duration::from_millis(500))
            .build();
        assert_eq!(custom.debounce_window, Duration::from_millis(500));
    }

    #[test]
    fn test_builder_clamping() {
        let config = EngineConfig::builder()
            .confidence_threshold(1.5)
            .smoothing_window(0)
            .build();
        assert!((config.confidence_threshold - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.smoothing_window, 1);
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
