//! Error types for the FormSense engine.
//!
//! This module provides the error taxonomy for the evaluation pipeline using
//! [`thiserror`] for automatic `Display` and `Error` trait implementations.
//!
//! # Error Hierarchy
//!
//! - [`EngineError`]: Top-level error type that encompasses all subsystem errors
//! - [`PoseError`]: Errors related to keypoint extraction from a pose frame
//! - [`GeometryError`]: Errors from joint angle computation
//! - [`EstimatorError`]: Errors from the external pose estimator
//!
//! # Example
//!
//! ```rust
//! use formsense_core::error::{EngineError, PoseError};
//! use formsense_core::types::BodyPart;
//!
//! fn extract_knee() -> Result<(), EngineError> {
//!     // Keypoint extraction that might fail
//!     Err(PoseError::MissingKeypoint { part: BodyPart::LeftKnee }.into())
//! }
//! ```

use thiserror::Error;

use crate::types::BodyPart;

/// A specialized `Result` type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Top-level error type for the FormSense engine.
///
/// This enum encompasses all possible errors that can occur within the
/// evaluation pipeline, providing a unified error type for the workspace.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    /// Keypoint extraction error
    #[error("Pose error: {0}")]
    Pose(#[from] PoseError),

    /// Joint geometry error
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// External pose estimator error
    #[error("Estimator error: {0}")]
    Estimator(#[from] EstimatorError),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Validation error for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Description of what validation failed
        message: String,
    },
}

impl EngineError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors skip the affected frame (or side) and the pipeline
    /// continues with the next cycle; non-recoverable errors indicate a
    /// misconfigured or persistently failing collaborator.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Pose(e) => e.is_recoverable(),
            Self::Geometry(e) => e.is_recoverable(),
            Self::Estimator(e) => e.is_recoverable(),
            Self::Configuration { .. } | Self::Validation { .. } => false,
        }
    }
}

/// Errors related to keypoint extraction from a pose frame.
///
/// These are the expected per-frame faults of a live estimator: a landmark
/// the active exercise needs is either absent from the frame or reported
/// below the usable confidence threshold. Both skip the affected side and
/// leave the previously emitted result on screen.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum PoseError {
    /// A required landmark is absent from the frame
    #[error("Required keypoint missing: {part}")]
    MissingKeypoint {
        /// The missing landmark
        part: BodyPart,
    },

    /// A required landmark was observed below the usable confidence threshold
    #[error("Keypoint {part} below confidence threshold: {confidence:.2} <= {threshold:.2}")]
    LowConfidence {
        /// The low-confidence landmark
        part: BodyPart,
        /// Reported confidence
        confidence: f32,
        /// Required threshold
        threshold: f32,
    },
}

impl PoseError {
    /// Returns `true` if this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        // Both variants skip the frame for the affected side; the next frame
        // may well carry the landmark again.
        true
    }
}

/// Errors from joint angle computation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeometryError {
    /// A displacement vector at the joint vertex has zero magnitude
    /// (coincident points), so the angle is undefined
    #[error("Degenerate joint geometry: zero-length segment at the vertex")]
    DegenerateSegment,
}

impl GeometryError {
    /// Returns `true` if this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        // A degenerate observation is a per-frame estimator glitch, not a
        // pipeline fault.
        true
    }
}

/// Errors from the external pose estimator collaborator.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EstimatorError {
    /// The per-frame inference call failed
    #[error("Pose inference failed: {message}")]
    InferenceFailed {
        /// Description of the failure
        message: String,
    },

    /// The estimator is not ready to serve inference requests
    #[error("Estimator not ready: {message}")]
    NotReady {
        /// Description of the missing precondition
        message: String,
    },
}

impl EstimatorError {
    /// Creates a new inference failure error.
    #[must_use]
    pub fn inference_failed(message: impl Into<String>) -> Self {
        Self::InferenceFailed {
            message: message.into(),
        }
    }

    /// Creates a new not-ready error.
    #[must_use]
    pub fn not_ready(message: impl Into<String>) -> Self {
        Self::NotReady {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::InferenceFailed { .. } => true,
            Self::NotReady { .. } => false,
        }
    }
}
