//! The single-writer collaborative session state machine.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use patternjam_core::{ParticipantId, Pattern, PatternId, PatternStore, SessionId};

use crate::error::CollabError;
use crate::op::{apply_operation, Operation};
use crate::participant::Participant;
use crate::resolve::ConflictPolicy;
use crate::transform::transform;

/// `Open -> Closed`; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Open,
    Closed,
}

/// One accepted operation plus the version it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub version: u64,
    pub op: Operation,
}

/// Owns one evolving pattern lineage and its edit history.
///
/// All edits for a session must be serialized by the caller (see
/// [`crate::hub::SessionHub`]); the session itself is a plain state
/// machine so history order and OT replay stay deterministic.
pub struct CollaborativeSession {
    id: SessionId,
    pattern_id: PatternId,
    pattern: Pattern,
    version: u64,
    participants: Vec<Participant>,
    history: Vec<HistoryEntry>,
    policy: ConflictPolicy,
    state: SessionState,
    store: Arc<dyn PatternStore>,
}

impl CollaborativeSession {
    /// Open a session over `pattern_id`, seeding from the store when the
    /// id already holds a pattern.
    pub fn new(
        id: impl Into<SessionId>,
        pattern_id: impl Into<PatternId>,
        policy: ConflictPolicy,
        store: Arc<dyn PatternStore>,
    ) -> Self {
        let pattern_id = pattern_id.into();
        let pattern = store.get(&pattern_id).unwrap_or_default();
        Self {
            id: id.into(),
            pattern_id,
            pattern,
            version: 0,
            participants: Vec::new(),
            history: Vec::new(),
            policy,
            state: SessionState::Open,
            store,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn pattern_id(&self) -> &PatternId {
        &self.pattern_id
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Register a participant. Re-joining with an existing id is a no-op.
    pub fn join(&mut self, participant: Participant) -> Result<(), CollabError> {
        self.ensure_open()?;
        if self.participant(&participant.id).is_none() {
            self.participants.push(participant);
        }
        Ok(())
    }

    /// Remove a participant; returns how many remain.
    pub fn leave(&mut self, id: &ParticipantId) -> usize {
        self.participants.retain(|p| &p.id != id);
        self.participants.len()
    }

    /// Close the session. All in-flight and future edits are rejected.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }

    /// Validate, transform, apply, and record a single incoming edit.
    ///
    /// Either the whole operation lands in history and a new pattern
    /// version is produced, or nothing changes and an error is returned.
    pub fn apply_edit(&mut self, op: Operation) -> Result<Pattern, CollabError> {
        self.ensure_open()?;
        self.ensure_participant(&op.participant)?;

        let transformed = self.rebase(op);
        transformed.validate_against(self.pattern.len())?;
        self.commit(transformed)
    }

    /// Apply a batch of operations delivered within the same tick.
    ///
    /// Operations whose transformed ranges still collide across
    /// participants are routed through the session's conflict policy.
    /// The batch is all-or-nothing: if any member fails validation,
    /// no member is applied.
    pub fn apply_concurrent(&mut self, ops: Vec<Operation>) -> Result<Pattern, CollabError> {
        self.ensure_open()?;
        if ops.is_empty() {
            return Ok(self.pattern.clone());
        }
        for op in &ops {
            self.ensure_participant(&op.participant)?;
        }

        let rebased: Vec<Operation> = ops.into_iter().map(|op| self.rebase(op)).collect();
        let ordered = self.resolve_collisions(rebased)?;

        // Dry-run the whole batch before any of it lands.
        let mut scratch = self.pattern.clone();
        let mut staged: Vec<Operation> = Vec::with_capacity(ordered.len());
        for mut op in ordered {
            for prior in &staged {
                op = transform(prior, &op);
            }
            scratch = apply_operation(&scratch, &op)?;
            staged.push(op);
        }

        for op in staged {
            self.commit(op)?;
        }
        Ok(self.pattern.clone())
    }

    fn ensure_open(&self) -> Result<(), CollabError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(CollabError::SessionClosed)
        }
    }

    fn ensure_participant(&self, id: &ParticipantId) -> Result<(), CollabError> {
        if self.participant(id).is_some() {
            Ok(())
        } else {
            Err(CollabError::UnknownParticipant { id: id.clone() })
        }
    }

    /// Replay the transform against every history entry newer than the
    /// operation's base version, in acceptance order.
    fn rebase(&self, op: Operation) -> Operation {
        let base_version = op.base_version;
        self.history
            .iter()
            .filter(|entry| entry.version > base_version)
            .fold(op, |acc, entry| transform(&entry.op, &acc))
    }

    /// Group still-colliding operations from different participants and
    /// run each group through the conflict policy; singles pass through
    /// in arrival order.
    fn resolve_collisions(&self, ops: Vec<Operation>) -> Result<Vec<Operation>, CollabError> {
        let mut groups: Vec<Vec<Operation>> = Vec::new();
        for op in ops {
            match groups
                .iter_mut()
                .find(|group| group.iter().any(|other| other.overlaps(&op)))
            {
                Some(group) => group.push(op),
                None => groups.push(vec![op]),
            }
        }

        let mut ordered = Vec::new();
        for group in groups {
            let participants: HashSet<&ParticipantId> =
                group.iter().map(|op| &op.participant).collect();
            if group.len() > 1 && participants.len() > 1 {
                ordered.extend(self.policy.resolve(group)?);
            } else {
                ordered.extend(group);
            }
        }
        Ok(ordered)
    }

    /// Apply a validated operation: new pattern version, history entry,
    /// contribution scoring, canonical store write.
    fn commit(&mut self, op: Operation) -> Result<Pattern, CollabError> {
        let next = apply_operation(&self.pattern, &op)?;

        self.version += 1;
        if let Some(participant) = self
            .participants
            .iter_mut()
            .find(|p| p.id == op.participant)
        {
            participant.contribution_score += op.edit_weight();
            participant.last_activity = op.issued_at;
            participant.cursor_position = op.position + op.payload.len();
        }
        self.history.push(HistoryEntry {
            version: self.version,
            op,
        });

        self.pattern = next.clone();
        self.store.put(self.pattern_id.clone(), next.clone());
        Ok(next)
    }
}
