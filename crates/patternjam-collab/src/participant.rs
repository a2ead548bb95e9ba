//! Session participants.

use serde::{Deserialize, Serialize};

use patternjam_core::ParticipantId;

/// One editor in a collaborative session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub cursor_position: usize,
    pub last_activity: u64,
    /// Monotonically increasing counter weighted by edit size.
    pub contribution_score: u64,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            cursor_position: 0,
            last_activity: 0,
            contribution_score: 0,
        }
    }
}
