//! Per-frame orchestration: keypoint extraction, smoothing, evaluation,
//! and counting for the selected exercise.

use formsense_core::{
    BodyPart, Evaluation, ExerciseKind, FrameOutput, PoseError, PoseFrame, Resettable, Side,
};
use tracing::{debug, warn};

use crate::counter::RepCounter;
use crate::evaluation::FormEvaluator;
use crate::geometry;
use crate::smoothing::SmootherBank;
use crate::EngineConfig;

/// Policy for feeding bilateral evaluations to the repetition counter.
///
/// Mirrored-limb exercises evaluate the left and right side independently in
/// the same frame; this policy names what that means for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepPolicy {
    /// Feed at most one qualifying side per frame to the counter, so one
    /// repetition is counted once no matter how many limbs qualified.
    #[default]
    FirstQualifyingSide,
    /// Feed every evaluated side to the counter separately. The debounce
    /// window still applies across the feeds, so two increments in one frame
    /// require distinct capture timestamps further apart than the window.
    PerLimb,
}

/// Returns the landmark triple `(a, vertex, c)` whose angle grades the given
/// exercise on the given side.
fn angle_landmarks(exercise: ExerciseKind, side: Side) -> (BodyPart, BodyPart, BodyPart) {
    match exercise {
        ExerciseKind::Squat | ExerciseKind::Lunge => (
            BodyPart::hip(side),
            BodyPart::knee(side),
            BodyPart::ankle(side),
        ),
        ExerciseKind::ShoulderPress | ExerciseKind::DumbbellCurl => (
            BodyPart::shoulder(side),
            BodyPart::elbow(side),
            BodyPart::wrist(side),
        ),
    }
}

/// Drives the per-frame evaluation cycle and owns all persistent state: the
/// smoothing windows, the repetition counter, the selected exercise, and the
/// last emitted output.
///
/// Data flows strictly forward through one frame:
/// keypoints → angle(s) → smoothed angle (squat) → classification → counted
/// event → emitted [`FrameOutput`]. A frame whose required landmarks are all
/// missing or low-confidence is skipped: [`process_frame`] returns `None` and
/// the previously emitted output stays current.
///
/// [`process_frame`]: Self::process_frame
#[derive(Debug)]
pub struct SessionEngine {
    config: EngineConfig,
    exercise: ExerciseKind,
    evaluator: FormEvaluator,
    smoothers: SmootherBank,
    counter: RepCounter,
    last_output: Option<FrameOutput>,
}

impl SessionEngine {
    /// Creates an engine from the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            exercise: config.exercise,
            evaluator: FormEvaluator::new(config.mode),
            smoothers: SmootherBank::new(config.smoothing_window),
            counter: RepCounter::new(config.debounce_window),
            last_output: None,
            config,
        }
    }

    /// Returns the currently selected exercise.
    #[must_use]
    pub fn exercise(&self) -> ExerciseKind {
        self.exercise
    }

    /// Returns the current repetition count.
    #[must_use]
    pub fn rep_count(&self) -> u32 {
        self.counter.count()
    }

    /// Returns the last emitted output, if any frame has been processed.
    #[must_use]
    pub fn last_output(&self) -> Option<&FrameOutput> {
        self.last_output.as_ref()
    }

    /// Switches the active exercise.
    ///
    /// Selecting a different exercise resets all per-exercise state
    /// atomically: the repetition count, the debounce timestamp, the
    /// smoothing windows, and the retained output. Re-selecting the current
    /// exercise is a no-op.
    pub fn set_exercise(&mut self, exercise: ExerciseKind) {
        if exercise == self.exercise {
            return;
        }
        debug!(from = %self.exercise, to = %exercise, "exercise switched");
        self.exercise = exercise;
        self.counter.reset();
        self.smoothers.reset();
        self.last_output = None;
    }

    /// Processes one pose frame.
    ///
    /// Returns the output to display, or `None` when the frame was skipped
    /// because no side had all of its required landmarks at usable
    /// confidence. On a skip, the previously emitted output and the count
    /// are retained unchanged.
    pub fn process_frame(&mut self, frame: &PoseFrame) -> Option<FrameOutput> {
        let output = match self.exercise {
            ExerciseKind::Lunge => self.process_lunge(frame),
            _ => self.process_bilateral(frame),
        };

        if let Some(ref output) = output {
            self.last_output = Some(output.clone());
        } else {
            debug!(frame = %frame.id, exercise = %self.exercise, "frame skipped");
        }
        output
    }

    /// Evaluates a mirrored-limb exercise: each available side independently,
    /// then counting per the configured [`RepPolicy`].
    fn process_bilateral(&mut self, frame: &PoseFrame) -> Option<FrameOutput> {
        let mut evaluations: Vec<Evaluation> = Vec::with_capacity(2);

        for side in Side::both() {
            let Some(angle) = self.side_angle(frame, side) else {
                continue;
            };
            // Only the squat grades a smoothed angle; the arm exercises use
            // the instantaneous one.
            let angle = if self.exercise == ExerciseKind::Squat && angle.is_finite() {
                self.smoothers.smooth(self.exercise, side, angle)
            } else {
                angle
            };
            let evaluation = self.evaluator.evaluate(self.exercise, angle);
            debug!(
                frame = %frame.id,
                exercise = %self.exercise,
                %side,
                angle,
                result = %evaluation,
                "form evaluated"
            );
            evaluations.push(evaluation);
        }

        if evaluations.is_empty() {
            return None;
        }

        match self.config.rep_policy {
            RepPolicy::FirstQualifyingSide => {
                let qualifies = evaluations.iter().any(Evaluation::is_full_success);
                self.counter.observe(qualifies, frame.timestamp);
            }
            RepPolicy::PerLimb => {
                for evaluation in &evaluations {
                    self.counter
                        .observe(evaluation.is_full_success(), frame.timestamp);
                }
            }
        }

        let displayed = evaluations.into_iter().min_by_key(Evaluation::rank)?;

        Some(FrameOutput {
            exercise: self.exercise,
            evaluation: displayed,
            rep_count: self.counter.count(),
        })
    }

    /// Evaluates a lunge: both knee angles are required, and either leg may
    /// serve as the front one, so both assignments are scored and the more
    /// favorable composite is kept.
    fn process_lunge(&mut self, frame: &PoseFrame) -> Option<FrameOutput> {
        let left = self.side_angle(frame, Side::Left)?;
        let right = self.side_angle(frame, Side::Right)?;

        let left_front = self.evaluator.evaluate_lunge(left, right);
        let right_front = self.evaluator.evaluate_lunge(right, left);
        let evaluation = if right_front.rank() < left_front.rank() {
            right_front
        } else {
            left_front
        };
        debug!(
            frame = %frame.id,
            left_knee = left,
            right_knee = right,
            result = %evaluation,
            "lunge evaluated"
        );

        self.counter
            .observe(evaluation.is_full_success(), frame.timestamp);

        Some(FrameOutput {
            exercise: self.exercise,
            evaluation,
            rep_count: self.counter.count(),
        })
    }

    /// Computes the joint angle for one side of the active exercise.
    ///
    /// Returns `None` when a required landmark is absent or below the usable
    /// confidence threshold (the side is skipped). Degenerate geometry is
    /// surfaced in the log and mapped to NaN so the evaluator lands on the
    /// lowest grade instead of crashing; the NaN sample is kept out of the
    /// smoothing windows.
    fn side_angle(&mut self, frame: &PoseFrame, side: Side) -> Option<f32> {
        let (a_part, vertex_part, c_part) = angle_landmarks(self.exercise, side);

        let a = self.require_keypoint(frame, a_part)?;
        let vertex = self.require_keypoint(frame, vertex_part)?;
        let c = self.require_keypoint(frame, c_part)?;

        match geometry::joint_angle(a, vertex, c) {
            Ok(angle) => Some(angle),
            Err(error) => {
                warn!(
                    frame = %frame.id,
                    exercise = %self.exercise,
                    %side,
                    vertex = %vertex_part,
                    %error,
                    "degenerate joint geometry, grading as lowest"
                );
                Some(f32::NAN)
            }
        }
    }

    /// Looks up a required landmark's position, applying the confidence gate.
    fn require_keypoint(&self, frame: &PoseFrame, part: BodyPart) -> Option<(f32, f32)> {
        let threshold = self.config.confidence_threshold;
        match frame.keypoint(part) {
            Some(kp) if kp.confidence.is_usable(threshold) => Some(kp.position()),
            Some(kp) => {
                debug!(
                    frame = %frame.id,
                    reason = %PoseError::LowConfidence {
                        part,
                        confidence: kp.confidence.value(),
                        threshold,
                    },
                    "side skipped"
                );
                None
            }
            None => {
                debug!(
                    frame = %frame.id,
                    reason = %PoseError::MissingKeypoint { part },
                    "side skipped"
                );
                None
            }
        }
    }
}

impl Resettable for SessionEngine {
    fn reset(&mut self) {
        self.counter.reset();
        self.smoothers.reset();
        self.last_output = None;
    }
}
