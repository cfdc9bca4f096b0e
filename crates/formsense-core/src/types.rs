//! Core data types for the FormSense engine.
//!
//! This module defines the fundamental data structures used throughout the
//! evaluation pipeline for representing keypoint observations, pose frames,
//! and evaluation results.
//!
//! # Type Categories
//!
//! - **Pose Types**: [`PoseFrame`], [`Keypoint`], [`BodyPart`], [`Side`]
//! - **Evaluation Types**: [`ExerciseKind`], [`FormGrade`], [`Evaluation`],
//!   [`FrameOutput`]
//! - **Common Types**: [`Confidence`], [`Timestamp`], [`FrameId`]

use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::BODY_PART_COUNT;

// =============================================================================
// Common Types
// =============================================================================

/// Unique identifier for a pose frame, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameId(Uuid);

impl FrameId {
    /// Creates a new unique frame ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a frame ID from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FrameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Millisecond-precision timestamp for frame capture and debounce arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Creates a timestamp from the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Returns the timestamp as milliseconds since the Unix epoch.
    #[must_use]
    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Returns the elapsed duration since an earlier timestamp.
    ///
    /// Saturates to zero when `earlier` is not actually earlier.
    #[must_use]
    pub fn duration_since(&self, earlier: Self) -> Duration {
        let diff = self.0.saturating_sub(earlier.0);
        Duration::from_millis(diff.max(0) as u64)
    }
}

/// Confidence score in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Confidence(f32);

impl Confidence {
    /// Creates a new confidence value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range [0.0, 1.0].
    pub fn new(value: f32) -> EngineResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(EngineError::validation(format!(
                "Confidence must be in [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Returns the raw confidence value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Returns `true` if the confidence strictly exceeds the given threshold.
    ///
    /// A landmark at exactly the threshold is treated as absent.
    #[must_use]
    pub fn is_usable(&self, threshold: f32) -> bool {
        self.0 > threshold
    }

    /// Maximum confidence (1.0).
    pub const MAX: Self = Self(1.0);

    /// Minimum confidence (0.0).
    pub const MIN: Self = Self(0.0);
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

// =============================================================================
// Pose Types
// =============================================================================

/// Body side for bilateral evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    /// Left limb
    Left,
    /// Right limb
    Right,
}

impl Side {
    /// Returns both sides in evaluation order.
    #[must_use]
    pub const fn both() -> [Self; 2] {
        [Self::Left, Self::Right]
    }

    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the side name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Named anatomical landmarks following COCO keypoint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum BodyPart {
    /// Nose
    Nose = 0,
    /// Left eye
    LeftEye = 1,
    /// Right eye
    RightEye = 2,
    /// Left ear
    LeftEar = 3,
    /// Right ear
    RightEar = 4,
    /// Left shoulder
    LeftShoulder = 5,
    /// Right shoulder
    RightShoulder = 6,
    /// Left elbow
    LeftElbow = 7,
    /// Right elbow
    RightElbow = 8,
    /// Left wrist
    LeftWrist = 9,
    /// Right wrist
    RightWrist = 10,
    /// Left hip
    LeftHip = 11,
    /// Right hip
    RightHip = 12,
    /// Left knee
    LeftKnee = 13,
    /// Right knee
    RightKnee = 14,
    /// Left ankle
    LeftAnkle = 15,
    /// Right ankle
    RightAnkle = 16,
}

impl BodyPart {
    /// Returns all body parts in COCO order.
    #[must_use]
    pub fn all() -> &'static [Self; BODY_PART_COUNT] {
        &[
            Self::Nose,
            Self::LeftEye,
            Self::RightEye,
            Self::LeftEar,
            Self::RightEar,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
        ]
    }

    /// Returns the landmark name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "left_eye",
            Self::RightEye => "right_eye",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
        }
    }

    /// Returns the hip landmark for the given side.
    #[must_use]
    pub const fn hip(side: Side) -> Self {
        match side {
            Side::Left => Self::LeftHip,
            Side::Right => Self::RightHip,
        }
    }

    /// Returns the knee landmark for the given side.
    #[must_use]
    pub const fn knee(side: Side) -> Self {
        match side {
            Side::Left => Self::LeftKnee,
            Side::Right => Self::RightKnee,
        }
    }

    /// Returns the ankle landmark for the given side.
    #[must_use]
    pub const fn ankle(side: Side) -> Self {
        match side {
            Side::Left => Self::LeftAnkle,
            Side::Right => Self::RightAnkle,
        }
    }

    /// Returns the shoulder landmark for the given side.
    #[must_use]
    pub const fn shoulder(side: Side) -> Self {
        match side {
            Side::Left => Self::LeftShoulder,
            Side::Right => Self::RightShoulder,
        }
    }

    /// Returns the elbow landmark for the given side.
    #[must_use]
    pub const fn elbow(side: Side) -> Self {
        match side {
            Side::Left => Self::LeftElbow,
            Side::Right => Self::RightElbow,
        }
    }

    /// Returns the wrist landmark for the given side.
    #[must_use]
    pub const fn wrist(side: Side) -> Self {
        match side {
            Side::Left => Self::LeftWrist,
            Side::Right => Self::RightWrist,
        }
    }
}

impl TryFrom<u8> for BodyPart {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::all()
            .get(value as usize)
            .copied()
            .ok_or_else(|| EngineError::validation(format!("Invalid body part index: {value}")))
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single keypoint observation with position and confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keypoint {
    /// The observed landmark
    pub part: BodyPart,
    /// X coordinate in frame pixel space
    pub x: f32,
    /// Y coordinate in frame pixel space
    pub y: f32,
    /// Detection confidence
    pub confidence: Confidence,
}

impl Keypoint {
    /// Creates a new keypoint observation.
    #[must_use]
    pub fn new(part: BodyPart, x: f32, y: f32, confidence: Confidence) -> Self {
        Self {
            part,
            x,
            y,
            confidence,
        }
    }

    /// Returns the 2D position as a tuple.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// One instant's worth of keypoint observations, at most one per landmark.
///
/// A frame is owned by the current processing cycle and discarded after it;
/// the engine never retains keypoints beyond the smoothing buffer.
#[derive(Debug, Clone)]
pub struct PoseFrame {
    /// Unique frame identifier
    pub id: FrameId,
    /// Capture timestamp
    pub timestamp: Timestamp,
    keypoints: [Option<Keypoint>; BODY_PART_COUNT],
}

impl PoseFrame {
    /// Creates a new empty pose frame.
    #[must_use]
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            id: FrameId::new(),
            timestamp,
            keypoints: [None; BODY_PART_COUNT],
        }
    }

    /// Creates a pose frame from a collection of observations.
    ///
    /// When the collection carries several observations for the same landmark,
    /// the last one wins.
    #[must_use]
    pub fn from_keypoints(
        timestamp: Timestamp,
        keypoints: impl IntoIterator<Item = Keypoint>,
    ) -> Self {
        let mut frame = Self::new(timestamp);
        for keypoint in keypoints {
            frame.set_keypoint(keypoint);
        }
        frame
    }

    /// Sets an observation, replacing any previous one for the same landmark.
    pub fn set_keypoint(&mut self, keypoint: Keypoint) {
        self.keypoints[keypoint.part as usize] = Some(keypoint);
    }

    /// Looks up the observation for a landmark.
    #[must_use]
    pub fn keypoint(&self, part: BodyPart) -> Option<&Keypoint> {
        self.keypoints[part as usize].as_ref()
    }

    /// Looks up the observation for a landmark, applying the confidence gate.
    ///
    /// Returns `None` when the landmark is absent or its confidence does not
    /// strictly exceed `threshold`.
    #[must_use]
    pub fn usable_keypoint(&self, part: BodyPart, threshold: f32) -> Option<&Keypoint> {
        self.keypoint(part)
            .filter(|kp| kp.confidence.is_usable(threshold))
    }

    /// Returns the number of observed landmarks.
    #[must_use]
    pub fn keypoint_count(&self) -> usize {
        self.keypoints.iter().filter(|kp| kp.is_some()).count()
    }
}

// =============================================================================
// Evaluation Types
// =============================================================================

/// The supported exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExerciseKind {
    /// Squat, graded on the knee angle
    Squat,
    /// Lunge, graded on the front and back knee angles together
    Lunge,
    /// Shoulder press, graded on the elbow angle
    ShoulderPress,
    /// Dumbbell curl, graded on the elbow angle
    DumbbellCurl,
}

impl ExerciseKind {
    /// Returns all exercise kinds.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [
            Self::Squat,
            Self::Lunge,
            Self::ShoulderPress,
            Self::DumbbellCurl,
        ]
    }

    /// Returns the exercise name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::Lunge => "lunge",
            Self::ShoulderPress => "shoulder_press",
            Self::DumbbellCurl => "dumbbell_curl",
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Four-level qualitative form grade, most favorable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FormGrade {
    /// Form within the target band
    Perfect,
    /// Slightly outside the target band
    Good,
    /// Noticeably outside the target band
    Soso,
    /// Far outside the target band, or no valid signal
    Bad,
}

impl FormGrade {
    /// Returns the favorability rank (0 = most favorable).
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Perfect => 0,
            Self::Good => 1,
            Self::Soso => 2,
            Self::Bad => 3,
        }
    }

    /// Returns the grade label shown in the overlay.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::Good => "Good",
            Self::Soso => "Soso",
            Self::Bad => "Bad",
        }
    }
}

impl std::fmt::Display for FormGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-frame evaluation result.
///
/// A single polymorphic result type covers both deployment variants: the
/// four-level graded overlay and the two-level correct/incorrect overlay
/// with a textual cue. Both share one status axis via
/// [`is_full_success`](Self::is_full_success).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Evaluation {
    /// Four-level grade
    Graded(FormGrade),
    /// Two-level result with an optional corrective cue
    Binary {
        /// Whether the form was within the target band
        correct: bool,
        /// Corrective cue when incorrect
        feedback: Option<&'static str>,
    },
}

impl Evaluation {
    /// Returns `true` for the full-success statuses (Perfect / Correct),
    /// the only statuses that can advance the repetition counter.
    #[must_use]
    pub fn is_full_success(&self) -> bool {
        match self {
            Self::Graded(grade) => *grade == FormGrade::Perfect,
            Self::Binary { correct, .. } => *correct,
        }
    }

    /// Returns the favorability rank (0 = most favorable), comparable across
    /// both variants.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::Graded(grade) => grade.rank(),
            Self::Binary { correct: true, .. } => 0,
            Self::Binary { correct: false, .. } => FormGrade::Bad.rank(),
        }
    }

    /// Returns the grade for the graded variant.
    #[must_use]
    pub fn grade(&self) -> Option<FormGrade> {
        match self {
            Self::Graded(grade) => Some(*grade),
            Self::Binary { .. } => None,
        }
    }

    /// Returns the corrective cue, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&'static str> {
        match self {
            Self::Graded(_) => None,
            Self::Binary { feedback, .. } => *feedback,
        }
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Graded(grade) => f.write_str(grade.label()),
            Self::Binary {
                correct: true,
                ..
            } => f.write_str("Correct"),
            Self::Binary {
                correct: false,
                feedback,
            } => match feedback {
                Some(cue) => write!(f, "Incorrect ({cue})"),
                None => f.write_str("Incorrect"),
            },
        }
    }
}

/// Per-frame output emitted to the display collaborator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FrameOutput {
    /// The exercise this output was evaluated for
    pub exercise: ExerciseKind,
    /// The evaluation result
    pub evaluation: Evaluation,
    /// Current repetition count
    pub rep_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_validation() {
        assert!(Confidence::new(0.5).is_ok());
        assert!(Confidence::new(0.0).is_ok());
        assert!(Confidence::new(1.0).is_ok());
        assert!(Confidence::new(-0.1).is_err());
        assert!(Confidence::new(1.1).is_err());
    }

    #[test]
    fn test_confidence_gate_is_strict() {
        let at_threshold = Confidence::new(0.5).unwrap();
        let above = Confidence::new(0.6).unwrap();

        assert!(!at_threshold.is_usable(0.5));
        assert!(above.is_usable(0.5));
    }

    #[test]
    fn test_timestamp_duration() {
        let t1 = Timestamp::from_millis(1_000);
        let t2 = Timestamp::from_millis(2_500);

        assert_eq!(t2.duration_since(t1), Duration::from_millis(1_500));
        // Saturates when the order is reversed.
        assert_eq!(t1.duration_since(t2), Duration::ZERO);
    }

    #[test]
    fn test_body_part_conversion() {
        assert_eq!(BodyPart::try_from(0).unwrap(), BodyPart::Nose);
        assert_eq!(BodyPart::try_from(16).unwrap(), BodyPart::RightAnkle);
        assert!(BodyPart::try_from(17).is_err());
    }

    #[test]
    fn test_body_part_side_lookup() {
        assert_eq!(BodyPart::knee(Side::Left), BodyPart::LeftKnee);
        assert_eq!(BodyPart::knee(Side::Right), BodyPart::RightKnee);
        assert_eq!(BodyPart::elbow(Side::Left), BodyPart::LeftElbow);
        assert_eq!(BodyPart::wrist(Side::Right), BodyPart::RightWrist);
    }

    #[test]
    fn test_pose_frame_lookup() {
        let mut frame = PoseFrame::new(Timestamp::from_millis(0));
        frame.set_keypoint(Keypoint::new(
            BodyPart::LeftKnee,
            120.0,
            340.0,
            Confidence::new(0.9).unwrap(),
        ));
        frame.set_keypoint(Keypoint::new(
            BodyPart::LeftHip,
            118.0,
            260.0,
            Confidence::new(0.4).unwrap(),
        ));

        assert_eq!(frame.keypoint_count(), 2);
        assert!(frame.keypoint(BodyPart::LeftKnee).is_some());
        assert!(frame.keypoint(BodyPart::RightKnee).is_none());

        // The gate hides the low-confidence hip but not the knee.
        assert!(frame.usable_keypoint(BodyPart::LeftKnee, 0.5).is_some());
        assert!(frame.usable_keypoint(BodyPart::LeftHip, 0.5).is_none());
    }

    #[test]
    fn test_pose_frame_last_observation_wins() {
        let keypoints = [
            Keypoint::new(BodyPart::Nose, 1.0, 1.0, Confidence::MAX),
            Keypoint::new(BodyPart::Nose, 2.0, 2.0, Confidence::MAX),
        ];
        let frame = PoseFrame::from_keypoints(Timestamp::from_millis(0), keypoints);

        assert_eq!(frame.keypoint_count(), 1);
        assert_eq!(frame.keypoint(BodyPart::Nose).unwrap().x, 2.0);
    }

    #[test]
    fn test_grade_ranks() {
        assert!(FormGrade::Perfect.rank() < FormGrade::Good.rank());
        assert!(FormGrade::Good.rank() < FormGrade::Soso.rank());
        assert!(FormGrade::Soso.rank() < FormGrade::Bad.rank());
    }

    #[test]
    fn test_evaluation_status_axis() {
        assert!(Evaluation::Graded(FormGrade::Perfect).is_full_success());
        assert!(!Evaluation::Graded(FormGrade::Good).is_full_success());
        assert!(Evaluation::Binary {
            correct: true,
            feedback: None
        }
        .is_full_success());
        assert!(!Evaluation::Binary {
            correct: false,
            feedback: Some("bend knee more")
        }
        .is_full_success());
    }

    #[test]
    fn test_evaluation_display() {
        assert_eq!(Evaluation::Graded(FormGrade::Soso).to_string(), "Soso");
        assert_eq!(
            Evaluation::Binary {
                correct: false,
                feedback: Some("bend arm more")
            }
            .to_string(),
            "Incorrect (bend arm more)"
        );
    }
}
