//! Shared error-code trait and data-model errors.

use thiserror::Error;

/// Stable machine-readable codes for engine errors.
///
/// Every library error in the workspace implements this so callers can key
/// on a code without matching on enum variants across crate versions.
pub trait ErrorCode {
    /// Stable error code, e.g. `"COLLAB_001"`.
    fn code(&self) -> &'static str;

    /// Component category, e.g. `"collab"` or `"evolve"`.
    fn category(&self) -> &'static str;
}

/// Errors produced by data-model validation.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("element {index} has non-positive duration {duration}")]
    InvalidDuration { index: usize, duration: f64 },
    #[error("element {index} has velocity {velocity} outside 0.0..=1.0")]
    InvalidVelocity { index: usize, velocity: f64 },
}

impl ErrorCode for PatternError {
    fn code(&self) -> &'static str {
        match self {
            PatternError::InvalidDuration { .. } => "CORE_001",
            PatternError::InvalidVelocity { .. } => "CORE_002",
        }
    }

    fn category(&self) -> &'static str {
        "core"
    }
}
