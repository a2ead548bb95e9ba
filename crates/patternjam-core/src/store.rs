//! Pattern storage contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::id::PatternId;
use crate::pattern::Pattern;

/// Minimal key/value contract for pattern version storage.
///
/// Pattern content is owned by the store and referenced by id everywhere
/// else. Reads may happen concurrently from many callers; writes come only
/// from a session's single writer or from the evolution engine storing
/// variants under fresh ids.
pub trait PatternStore: Send + Sync {
    fn get(&self, id: &PatternId) -> Option<Pattern>;
    fn put(&self, id: PatternId, pattern: Pattern);
}

/// In-memory `PatternStore` backed by a read/write lock.
#[derive(Debug, Default)]
pub struct MemoryPatternStore {
    inner: RwLock<HashMap<PatternId, Pattern>>,
}

impl MemoryPatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored ids, sorted for stable iteration.
    pub fn ids(&self) -> Vec<PatternId> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<PatternId> = guard.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl PatternStore for MemoryPatternStore {
    fn get(&self, id: &PatternId) -> Option<Pattern> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn put(&self, id: PatternId, pattern: Pattern) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, pattern);
    }
}
