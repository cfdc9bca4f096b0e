//! Core trait definitions for the FormSense engine.
//!
//! This module defines the contracts for the engine's external collaborators,
//! enabling a modular and testable architecture.
//!
//! # Traits
//!
//! - [`PoseEstimator`]: Produce zero-or-one pose frame per inference cycle
//! - [`FeedbackSink`]: Receive the per-frame evaluation and repetition count
//! - [`Resettable`]: Reset per-exercise state on an exercise switch

use async_trait::async_trait;

use crate::error::EstimatorError;
use crate::types::{FrameOutput, PoseFrame};

/// External pose estimator collaborator.
///
/// The engine consumes the estimator only through this contract: one call
/// per cycle which returns zero-or-one set of named 2D keypoints with
/// confidence scores. The estimator may be a local model or an asynchronous
/// remote call with variable latency; the processing loop guarantees that at
/// most one inference is in flight at a time.
///
/// # Example
///
/// ```ignore
/// use formsense_core::{PoseEstimator, PoseFrame};
///
/// async fn next_pose(estimator: &mut impl PoseEstimator) -> Option<PoseFrame> {
///     match estimator.estimate().await {
///         Ok(pose) => pose,
///         Err(e) => {
///             tracing::warn!(error = %e, "inference failed, retrying next cycle");
///             None
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait PoseEstimator: Send {
    /// Runs one inference cycle.
    ///
    /// Returns `Ok(None)` when no person was detected in the frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the inference call fails; recoverable failures are
    /// retried on the next cycle by the processing loop.
    async fn estimate(&mut self) -> Result<Option<PoseFrame>, EstimatorError>;
}

/// Display collaborator receiving per-frame results.
///
/// The engine emits exactly one [`FrameOutput`] per processed frame; skipped
/// frames emit nothing, so the sink's last rendered state persists.
pub trait FeedbackSink: Send {
    /// Renders one frame's evaluation result and repetition count.
    fn emit(&mut self, output: &FrameOutput);
}

/// Trait for types that can be reset to their initial state.
///
/// Implemented by every holder of per-exercise state so that an exercise
/// switch can reset all of it atomically.
pub trait Resettable {
    /// Resets the instance to its initial state.
    fn reset(&mut self);
}
