//! Error types for evolution runs.

use thiserror::Error;

use patternjam_core::{ErrorCode, PatternId};

/// Errors that can occur when starting or running an evolution.
#[derive(Debug, Error)]
pub enum EvolveError {
    #[error("unknown evolution algorithm '{name}'")]
    UnknownAlgorithm { name: String },
    #[error("seed pattern is empty")]
    EmptySeed,
    #[error("no pattern stored under id '{id}'")]
    UnknownPattern { id: PatternId },
}

impl ErrorCode for EvolveError {
    fn code(&self) -> &'static str {
        match self {
            EvolveError::UnknownAlgorithm { .. } => "EVOLVE_001",
            EvolveError::EmptySeed => "EVOLVE_002",
            EvolveError::UnknownPattern { .. } => "EVOLVE_003",
        }
    }

    fn category(&self) -> &'static str {
        "evolve"
    }
}
