//! Error types for collaborative editing.

use thiserror::Error;

use patternjam_core::{ErrorCode, ParticipantId, SessionId};

/// Errors that can occur while applying collaborative edits.
#[derive(Debug, Error)]
pub enum CollabError {
    #[error(
        "operation range {position}..{} is out of bounds for pattern of {pattern_len} elements",
        .position + .length
    )]
    InvalidRange {
        position: usize,
        length: usize,
        pattern_len: usize,
    },
    #[error("unknown participant '{id}'")]
    UnknownParticipant { id: ParticipantId },
    #[error("session is closed")]
    SessionClosed,
    #[error("conflict policy produced no total order for {candidates} candidate operations")]
    ConflictUnresolved { candidates: usize },
    #[error("unknown session '{id}'")]
    UnknownSession { id: SessionId },
}

impl ErrorCode for CollabError {
    fn code(&self) -> &'static str {
        match self {
            CollabError::InvalidRange { .. } => "COLLAB_001",
            CollabError::UnknownParticipant { .. } => "COLLAB_002",
            CollabError::SessionClosed => "COLLAB_003",
            CollabError::ConflictUnresolved { .. } => "COLLAB_004",
            CollabError::UnknownSession { .. } => "COLLAB_005",
        }
    }

    fn category(&self) -> &'static str {
        "collab"
    }
}
