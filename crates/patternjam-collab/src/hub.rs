//! The inbound-edit / outbound-broadcast boundary.
//!
//! One mutex per session is the serialization point spec'd for session
//! writes: `submit_operation` may block briefly on that lock but never on
//! I/O. Broadcasting is a fire-and-forget callback invoked outside the
//! session lock; the transport layer owns fan-out.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use patternjam_core::{ParticipantId, Pattern, PatternId, PatternStore, SessionId};

use crate::error::CollabError;
use crate::op::Operation;
use crate::participant::Participant;
use crate::resolve::ConflictPolicy;
use crate::session::CollaborativeSession;

/// Invoked after each accepted edit with the new canonical pattern.
pub type UpdateCallback = Box<dyn Fn(&SessionId, &Pattern, &ParticipantId) + Send + Sync>;

/// Registry of live sessions; concurrent sessions run independently.
pub struct SessionHub {
    store: Arc<dyn PatternStore>,
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<CollaborativeSession>>>>,
    on_update: RwLock<Option<UpdateCallback>>,
}

impl SessionHub {
    pub fn new(store: Arc<dyn PatternStore>) -> Self {
        Self {
            store,
            sessions: RwLock::new(HashMap::new()),
            on_update: RwLock::new(None),
        }
    }

    /// Install the outbound broadcast hook.
    pub fn set_broadcast(&self, callback: UpdateCallback) {
        *self
            .on_update
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(callback);
    }

    /// Open a session over a pattern lineage. Replaces nothing: opening an
    /// existing session id is a no-op returning the existing session.
    pub fn open_session(
        &self,
        session_id: impl Into<SessionId>,
        pattern_id: impl Into<PatternId>,
        policy: ConflictPolicy,
    ) -> SessionId {
        let session_id = session_id.into();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.entry(session_id.clone()).or_insert_with(|| {
            Arc::new(Mutex::new(CollaborativeSession::new(
                session_id.clone(),
                pattern_id,
                policy,
                Arc::clone(&self.store),
            )))
        });
        session_id
    }

    pub fn join(
        &self,
        session_id: &SessionId,
        participant: Participant,
    ) -> Result<(), CollabError> {
        let session = self.session(session_id)?;
        let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        guard.join(participant)
    }

    /// Remove a participant; the session is destroyed when the last one
    /// leaves.
    pub fn leave(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
    ) -> Result<(), CollabError> {
        let session = self.session(session_id)?;
        let remaining = {
            let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
            guard.leave(participant_id)
        };
        if remaining == 0 {
            self.close_session(session_id)?;
        }
        Ok(())
    }

    /// Inbound edit submission: serialize, apply, broadcast.
    pub fn submit_operation(
        &self,
        session_id: &SessionId,
        op: Operation,
    ) -> Result<Pattern, CollabError> {
        let session = self.session(session_id)?;
        let contributor = op.participant.clone();
        let pattern = {
            let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
            guard.apply_edit(op)?
        };
        self.broadcast(session_id, &pattern, &contributor);
        Ok(pattern)
    }

    /// Inbound batch submission for operations delivered within one tick.
    pub fn submit_batch(
        &self,
        session_id: &SessionId,
        ops: Vec<Operation>,
    ) -> Result<Pattern, CollabError> {
        let session = self.session(session_id)?;
        let mut contributors: Vec<ParticipantId> = Vec::new();
        for op in &ops {
            if !contributors.contains(&op.participant) {
                contributors.push(op.participant.clone());
            }
        }
        let pattern = {
            let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
            guard.apply_concurrent(ops)?
        };
        for contributor in &contributors {
            self.broadcast(session_id, &pattern, contributor);
        }
        Ok(pattern)
    }

    /// Close and remove a session; subsequent submissions see
    /// `UnknownSession`, in-flight ones `SessionClosed`.
    pub fn close_session(&self, session_id: &SessionId) -> Result<(), CollabError> {
        let session = {
            let mut sessions = self
                .sessions
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            sessions
                .remove(session_id)
                .ok_or_else(|| CollabError::UnknownSession {
                    id: session_id.clone(),
                })?
        };
        let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        guard.close();
        Ok(())
    }

    pub fn session(
        &self,
        session_id: &SessionId,
    ) -> Result<Arc<Mutex<CollaborativeSession>>, CollabError> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
            .ok_or_else(|| CollabError::UnknownSession {
                id: session_id.clone(),
            })
    }

    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn broadcast(&self, session_id: &SessionId, pattern: &Pattern, contributor: &ParticipantId) {
        if let Some(callback) = self
            .on_update
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            callback(session_id, pattern, contributor);
        }
    }
}
