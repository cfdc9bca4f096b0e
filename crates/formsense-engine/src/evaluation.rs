//! Per-exercise form classification from joint angles.
//!
//! Each exercise maps one or two angle values onto fixed numeric bands. The
//! band boundaries and the corrective cue strings are part of the observable
//! contract and are reproduced exactly.

use formsense_core::{Evaluation, ExerciseKind, FormGrade};

/// Corrective cue for an incorrect squat.
pub const SQUAT_CUE: &str = "bend knee more";
/// Corrective cue for an incorrect shoulder press.
pub const SHOULDER_PRESS_CUE: &str = "straighten arm more";
/// Corrective cue for an incorrect dumbbell curl.
pub const DUMBBELL_CURL_CUE: &str = "bend arm more";
/// Corrective cue for a lunge whose front knee is out of band.
pub const LUNGE_FRONT_CUE: &str = "bend front knee more";
/// Corrective cue for a lunge whose back leg is out of band.
pub const LUNGE_BACK_CUE: &str = "straighten back leg more";
/// Corrective cue for a lunge with both joints out of band.
pub const LUNGE_BOTH_CUE: &str = "bend front knee more and straighten back leg more";

/// Deployment variant for evaluation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationMode {
    /// Four-level grade (Perfect / Good / Soso / Bad)
    #[default]
    Graded,
    /// Two-level result (Correct / Incorrect) with a corrective cue
    Binary,
}

/// Grades a knee angle against the squat bands.
///
/// Also used for the front knee of a lunge, which shares the same bands.
fn knee_grade(angle: f32) -> FormGrade {
    if (80.0..=100.0).contains(&angle) {
        FormGrade::Perfect
    } else if (70.0..80.0).contains(&angle) || (100.0 < angle && angle <= 110.0) {
        FormGrade::Good
    } else if (60.0..70.0).contains(&angle) || (110.0 < angle && angle <= 120.0) {
        FormGrade::Soso
    } else {
        // NaN lands here as well: every band comparison is false.
        FormGrade::Bad
    }
}

/// Grades an elbow angle against the shoulder press bands.
fn press_grade(angle: f32) -> FormGrade {
    if (160.0..=180.0).contains(&angle) {
        FormGrade::Perfect
    } else if (150.0..160.0).contains(&angle) {
        FormGrade::Good
    } else if (140.0..150.0).contains(&angle) {
        FormGrade::Soso
    } else {
        FormGrade::Bad
    }
}

/// Grades an elbow angle against the dumbbell curl bands.
fn curl_grade(angle: f32) -> FormGrade {
    if (60.0..=80.0).contains(&angle) {
        FormGrade::Perfect
    } else if (50.0..60.0).contains(&angle) || (80.0 < angle && angle <= 90.0) {
        FormGrade::Good
    } else if (40.0..50.0).contains(&angle) || (90.0 < angle && angle <= 100.0) {
        FormGrade::Soso
    } else {
        FormGrade::Bad
    }
}

/// Grades the back knee angle of a lunge.
fn lunge_back_grade(angle: f32) -> FormGrade {
    if (160.0..=180.0).contains(&angle) {
        FormGrade::Perfect
    } else if (150.0..160.0).contains(&angle) {
        FormGrade::Good
    } else if (140.0..150.0).contains(&angle) {
        FormGrade::Soso
    } else {
        FormGrade::Bad
    }
}

/// Classifier mapping joint angles to a per-exercise [`Evaluation`].
///
/// The evaluator is pure: it carries only the configured deployment variant
/// and never panics, even on NaN angles from degenerate geometry (those fail
/// every band comparison and fall to the lowest grade).
#[derive(Debug, Clone, Copy, Default)]
pub struct FormEvaluator {
    mode: EvaluationMode,
}

impl FormEvaluator {
    /// Creates an evaluator for the given deployment variant.
    #[must_use]
    pub fn new(mode: EvaluationMode) -> Self {
        Self { mode }
    }

    /// Returns the configured deployment variant.
    #[must_use]
    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    /// Evaluates a single-angle exercise (squat, shoulder press, dumbbell
    /// curl).
    ///
    /// The angle is the smoothed knee angle for the squat and the
    /// instantaneous elbow angle for the arm exercises. Passing
    /// [`ExerciseKind::Lunge`] here grades its front knee only; use
    /// [`evaluate_lunge`](Self::evaluate_lunge) for the composite rule.
    #[must_use]
    pub fn evaluate(&self, exercise: ExerciseKind, angle: f32) -> Evaluation {
        let (grade, cue) = match exercise {
            ExerciseKind::Squat | ExerciseKind::Lunge => (knee_grade(angle), SQUAT_CUE),
            ExerciseKind::ShoulderPress => (press_grade(angle), SHOULDER_PRESS_CUE),
            ExerciseKind::DumbbellCurl => (curl_grade(angle), DUMBBELL_CURL_CUE),
        };

        match self.mode {
            EvaluationMode::Graded => Evaluation::Graded(grade),
            EvaluationMode::Binary => {
                if grade == FormGrade::Perfect {
                    Evaluation::Binary {
                        correct: true,
                        feedback: None,
                    }
                } else {
                    Evaluation::Binary {
                        correct: false,
                        feedback: Some(cue),
                    }
                }
            }
        }
    }

    /// Evaluates a lunge from the front-knee and back-knee angles.
    ///
    /// Composite precedence, most favorable first: Perfect iff both joints
    /// Perfect; else Good iff either joint Good; else Soso iff either joint
    /// Soso; else Bad.
    #[must_use]
    pub fn evaluate_lunge(&self, front_angle: f32, back_angle: f32) -> Evaluation {
        let front = knee_grade(front_angle);
        let back = lunge_back_grade(back_angle);

        match self.mode {
            EvaluationMode::Graded => {
                let composite = if front == FormGrade::Perfect && back == FormGrade::Perfect {
                    FormGrade::Perfect
                } else if front == FormGrade::Good || back == FormGrade::Good {
                    FormGrade::Good
                } else if front == FormGrade::Soso || back == FormGrade::Soso {
                    FormGrade::Soso
                } else {
                    FormGrade::Bad
                };
                Evaluation::Graded(composite)
            }
            EvaluationMode::Binary => {
                let front_ok = front == FormGrade::Perfect;
                let back_ok = back == FormGrade::Perfect;
                match (front_ok, back_ok) {
                    (true, true) => Evaluation::Binary {
                        correct: true,
                        feedback: None,
                    },
                    (false, true) => Evaluation::Binary {
                        correct: false,
                        feedback: Some(LUNGE_FRONT_CUE),
                    },
                    (true, false) => Evaluation::Binary {
                        correct: false,
                        feedback: Some(LUNGE_BACK_CUE),
                    },
                    (false, false) => Evaluation::Binary {
                        correct: false,
                        feedback: Some(LUNGE_BOTH_CUE),
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graded() -> FormEvaluator {
        FormEvaluator::new(EvaluationMode::Graded)
    }

    fn binary() -> FormEvaluator {
        FormEvaluator::new(EvaluationMode::Binary)
    }

    #[test]
    fn test_squat_bands() {
        let eval = graded();
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 90.0),
            Evaluation::Graded(FormGrade::Perfect)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 80.0),
            Evaluation::Graded(FormGrade::Perfect)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 100.0),
            Evaluation::Graded(FormGrade::Perfect)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 75.0),
            Evaluation::Graded(FormGrade::Good)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 105.0),
            Evaluation::Graded(FormGrade::Good)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 65.0),
            Evaluation::Graded(FormGrade::Soso)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 115.0),
            Evaluation::Graded(FormGrade::Soso)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 45.0),
            Evaluation::Graded(FormGrade::Bad)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 130.0),
            Evaluation::Graded(FormGrade::Bad)
        );
    }

    #[test]
    fn test_squat_band_edges() {
        let eval = graded();
        // Lower bounds are inclusive, the upper neighbors start exclusive.
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 70.0),
            Evaluation::Graded(FormGrade::Good)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 110.0),
            Evaluation::Graded(FormGrade::Good)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 60.0),
            Evaluation::Graded(FormGrade::Soso)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 120.0),
            Evaluation::Graded(FormGrade::Soso)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 59.9),
            Evaluation::Graded(FormGrade::Bad)
        );
    }

    #[test]
    fn test_shoulder_press_bands() {
        let eval = graded();
        assert_eq!(
            eval.evaluate(ExerciseKind::ShoulderPress, 170.0),
            Evaluation::Graded(FormGrade::Perfect)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::ShoulderPress, 155.0),
            Evaluation::Graded(FormGrade::Good)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::ShoulderPress, 145.0),
            Evaluation::Graded(FormGrade::Soso)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::ShoulderPress, 120.0),
            Evaluation::Graded(FormGrade::Bad)
        );
    }

    #[test]
    fn test_dumbbell_curl_bands() {
        let eval = graded();
        assert_eq!(
            eval.evaluate(ExerciseKind::DumbbellCurl, 70.0),
            Evaluation::Graded(FormGrade::Perfect)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::DumbbellCurl, 55.0),
            Evaluation::Graded(FormGrade::Good)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::DumbbellCurl, 85.0),
            Evaluation::Graded(FormGrade::Good)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::DumbbellCurl, 45.0),
            Evaluation::Graded(FormGrade::Soso)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::DumbbellCurl, 95.0),
            Evaluation::Graded(FormGrade::Soso)
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::DumbbellCurl, 110.0),
            Evaluation::Graded(FormGrade::Bad)
        );
    }

    #[test]
    fn test_lunge_composite_precedence() {
        let eval = graded();
        // Both Perfect.
        assert_eq!(
            eval.evaluate_lunge(90.0, 170.0),
            Evaluation::Graded(FormGrade::Perfect)
        );
        // Front Soso + back Perfect falls through "either Good" to
        // "either Soso".
        assert_eq!(
            eval.evaluate_lunge(65.0, 170.0),
            Evaluation::Graded(FormGrade::Soso)
        );
        // Front Perfect alone is not composite Perfect; back Good wins
        // before back Soso is considered.
        assert_eq!(
            eval.evaluate_lunge(90.0, 155.0),
            Evaluation::Graded(FormGrade::Good)
        );
        // Front Soso + back Good: the Good arm of the precedence fires first.
        assert_eq!(
            eval.evaluate_lunge(65.0, 155.0),
            Evaluation::Graded(FormGrade::Good)
        );
        assert_eq!(
            eval.evaluate_lunge(30.0, 100.0),
            Evaluation::Graded(FormGrade::Bad)
        );
    }

    #[test]
    fn test_binary_cues() {
        let eval = binary();
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 90.0),
            Evaluation::Binary {
                correct: true,
                feedback: None
            }
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::Squat, 130.0),
            Evaluation::Binary {
                correct: false,
                feedback: Some("bend knee more")
            }
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::ShoulderPress, 140.0),
            Evaluation::Binary {
                correct: false,
                feedback: Some("straighten arm more")
            }
        );
        assert_eq!(
            eval.evaluate(ExerciseKind::DumbbellCurl, 120.0),
            Evaluation::Binary {
                correct: false,
                feedback: Some("bend arm more")
            }
        );
    }

    #[test]
    fn test_binary_lunge_identifies_failed_joints() {
        let eval = binary();
        assert_eq!(
            eval.evaluate_lunge(90.0, 170.0),
            Evaluation::Binary {
                correct: true,
                feedback: None
            }
        );
        assert_eq!(
            eval.evaluate_lunge(60.0, 170.0),
            Evaluation::Binary {
                correct: false,
                feedback: Some(LUNGE_FRONT_CUE)
            }
        );
        assert_eq!(
            eval.evaluate_lunge(90.0, 140.0),
            Evaluation::Binary {
                correct: false,
                feedback: Some(LUNGE_BACK_CUE)
            }
        );
        assert_eq!(
            eval.evaluate_lunge(60.0, 140.0),
            Evaluation::Binary {
                correct: false,
                feedback: Some(LUNGE_BOTH_CUE)
            }
        );
    }

    #[test]
    fn test_nan_angle_is_lowest_grade() {
        assert_eq!(
            graded().evaluate(ExerciseKind::Squat, f32::NAN),
            Evaluation::Graded(FormGrade::Bad)
        );
        assert_eq!(
            binary().evaluate(ExerciseKind::ShoulderPress, f32::NAN),
            Evaluation::Binary {
                correct: false,
                feedback: Some(SHOULDER_PRESS_CUE)
            }
        );
        assert_eq!(
            graded().evaluate_lunge(f32::NAN, f32::NAN),
            Evaluation::Graded(FormGrade::Bad)
        );
    }
}
