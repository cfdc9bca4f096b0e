//! # FormSense Core
//!
//! Core types, errors, and traits for the FormSense exercise form evaluation
//! and repetition counting engine.
//!
//! This crate provides the foundational building blocks used throughout the
//! FormSense workspace, including:
//!
//! - **Core Data Types**: [`PoseFrame`], [`Keypoint`], [`BodyPart`],
//!   [`Evaluation`], and [`FrameOutput`] for representing keypoint
//!   observations and evaluation results.
//!
//! - **Error Types**: The engine's error taxonomy via the [`error`] module,
//!   with specific error types for pose extraction, joint geometry, and the
//!   external estimator.
//!
//! - **Traits**: The collaborator contracts [`PoseEstimator`] and
//!   [`FeedbackSink`], plus [`Resettable`] for per-exercise state.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization via serde
//!
//! ## Example
//!
//! ```rust
//! use formsense_core::{BodyPart, Confidence, Keypoint, PoseFrame, Timestamp};
//!
//! let mut frame = PoseFrame::new(Timestamp::from_millis(0));
//! frame.set_keypoint(Keypoint::new(
//!     BodyPart::LeftKnee,
//!     120.0,
//!     340.0,
//!     Confidence::new(0.95).unwrap(),
//! ));
//!
//! assert!(frame.usable_keypoint(BodyPart::LeftKnee, 0.5).is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types at the crate root
pub use error::{EngineError, EngineResult, EstimatorError, GeometryError, PoseError};
pub use traits::{FeedbackSink, PoseEstimator, Resettable};
pub use types::{
    // Pose types
    BodyPart, Keypoint, PoseFrame, Side,
    // Evaluation types
    Evaluation, ExerciseKind, FormGrade, FrameOutput,
    // Common types
    Confidence, FrameId, Timestamp,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of tracked landmarks per person (COCO format)
pub const BODY_PART_COUNT: usize = 17;

/// Default confidence threshold; landmarks at or below it are treated as absent
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Prelude module for convenient imports.
///
/// ```rust
/// use formsense_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{EngineError, EngineResult, EstimatorError, GeometryError, PoseError};
    pub use crate::traits::{FeedbackSink, PoseEstimator, Resettable};
    pub use crate::types::{
        BodyPart, Confidence, Evaluation, ExerciseKind, FormGrade, FrameId, FrameOutput, Keypoint,
        PoseFrame, Side, Timestamp,
    };
}
