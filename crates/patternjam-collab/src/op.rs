//! Edit operations and positional application.

use serde::{Deserialize, Serialize};

use patternjam_core::{Element, ParticipantId, Pattern};

use crate::error::CollabError;

/// The three edit primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Insert,
    Delete,
    Modify,
}

/// One participant edit against a known pattern version.
///
/// `base_version` is the session version the operation was computed
/// against; the session rebases the operation over every newer history
/// entry before applying it. `Modify` replaces `length` elements at
/// `position` with `payload` (the lengths may differ).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    pub participant: ParticipantId,
    pub base_version: u64,
    pub kind: OpKind,
    pub position: usize,
    #[serde(default)]
    pub length: usize,
    #[serde(default)]
    pub payload: Vec<Element>,
    pub issued_at: u64,
    /// Participant votes backing this operation; only consulted by the
    /// vote conflict policy.
    #[serde(default)]
    pub votes: u32,
}

impl Operation {
    pub fn insert(
        id: impl Into<String>,
        participant: impl Into<ParticipantId>,
        base_version: u64,
        position: usize,
        payload: Vec<Element>,
        issued_at: u64,
    ) -> Self {
        Self {
            id: id.into(),
            participant: participant.into(),
            base_version,
            kind: OpKind::Insert,
            position,
            length: 0,
            payload,
            issued_at,
            votes: 0,
        }
    }

    pub fn delete(
        id: impl Into<String>,
        participant: impl Into<ParticipantId>,
        base_version: u64,
        position: usize,
        length: usize,
        issued_at: u64,
    ) -> Self {
        Self {
            id: id.into(),
            participant: participant.into(),
            base_version,
            kind: OpKind::Delete,
            position,
            length,
            payload: Vec::new(),
            issued_at,
            votes: 0,
        }
    }

    pub fn modify(
        id: impl Into<String>,
        participant: impl Into<ParticipantId>,
        base_version: u64,
        position: usize,
        length: usize,
        payload: Vec<Element>,
        issued_at: u64,
    ) -> Self {
        Self {
            id: id.into(),
            participant: participant.into(),
            base_version,
            kind: OpKind::Modify,
            position,
            length,
            payload,
            issued_at,
            votes: 0,
        }
    }

    /// Number of existing elements this operation addresses.
    pub fn span(&self) -> usize {
        match self.kind {
            OpKind::Insert => 0,
            OpKind::Delete | OpKind::Modify => self.length,
        }
    }

    /// One past the last addressed index.
    pub fn end(&self) -> usize {
        self.position + self.span()
    }

    /// Whether two operations address overlapping target ranges.
    ///
    /// Inserts have zero span; two inserts collide only at the same
    /// position, and an insert collides with a range op when it lands
    /// strictly inside that op's range.
    pub fn overlaps(&self, other: &Operation) -> bool {
        match (self.span(), other.span()) {
            (0, 0) => self.position == other.position,
            (0, _) => other.position <= self.position && self.position < other.end(),
            (_, 0) => self.position <= other.position && other.position < self.end(),
            _ => self.position < other.end() && other.position < self.end(),
        }
    }

    /// Check the operation's range against the current pattern length.
    pub fn validate_against(&self, pattern_len: usize) -> Result<(), CollabError> {
        let fits = match self.kind {
            OpKind::Insert => self.position <= pattern_len,
            OpKind::Delete | OpKind::Modify => {
                self.position <= pattern_len && self.end() <= pattern_len
            }
        };
        if fits {
            Ok(())
        } else {
            Err(CollabError::InvalidRange {
                position: self.position,
                length: self.span(),
                pattern_len,
            })
        }
    }

    /// Contribution weight: how much pattern material the edit touches.
    pub fn edit_weight(&self) -> u64 {
        self.payload.len().max(self.length).max(1) as u64
    }
}

/// Apply a single validated operation, producing a new snapshot.
pub fn apply_operation(pattern: &Pattern, op: &Operation) -> Result<Pattern, CollabError> {
    op.validate_against(pattern.len())?;
    Ok(match op.kind {
        OpKind::Insert => pattern.with_insert(op.position, &op.payload),
        OpKind::Delete => pattern.with_delete(op.position, op.length),
        OpKind::Modify => pattern.with_replace(op.position, op.length, &op.payload),
    })
}

/// Replay an already-applied history in stored order against an empty base.
///
/// History entries are post-transform, so they apply verbatim; replaying
/// the same list always reproduces the same final pattern.
pub fn replay_history(ops: &[Operation]) -> Result<Pattern, CollabError> {
    let mut pattern = Pattern::empty();
    for op in ops {
        pattern = apply_operation(&pattern, op)?;
    }
    Ok(pattern)
}
