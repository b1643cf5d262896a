//! Unified error types for the puppy controller.
//!
//! A single `Error` enum that every subsystem converts into, so the control
//! loop handles failures in one place.  All variants are `Copy` and carry no
//! allocation.

use core::fmt;

use crate::motion::{Joint, Pose};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A motor did not finish its move.
    Motion(MotionError),
    /// An operation was attempted from the wrong physical pose.
    Pose(PoseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Motion(e) => write!(f, "motion: {e}"),
            Self::Pose(e) => write!(f, "pose: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Motion errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionError {
    /// The joint never reported its target reached within the wait budget.
    Timeout { joint: Joint, waited_ms: u32 },
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout { joint, waited_ms } => {
                write!(f, "{joint:?} did not reach target after {waited_ms} ms")
            }
        }
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Self::Motion(e)
    }
}

// ---------------------------------------------------------------------------
// Pose errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseError {
    /// Leg angles can only be zeroed while the puppy sits.
    NotSeated { actual: Pose },
}

impl fmt::Display for PoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSeated { actual } => write!(f, "must be seated, pose is {actual:?}"),
        }
    }
}

impl From<PoseError> for Error {
    fn from(e: PoseError) -> Self {
        Self::Pose(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
