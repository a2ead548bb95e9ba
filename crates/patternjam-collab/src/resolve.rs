//! Conflict-resolution policies.
//!
//! Invoked only when transformed operations still address overlapping
//! ranges and cannot be unambiguously ordered by the transform rules
//! alone. The policy is chosen once per session at creation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CollabError;
use crate::op::{OpKind, Operation};

/// How a session orders colliding operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Keep every candidate, ordered by issue time (default).
    #[default]
    Merge,
    /// Keep the highest-voted candidate per `(position, kind)` group.
    Vote,
    /// Last writer wins; every other candidate is dropped.
    Latest,
}

impl ConflictPolicy {
    /// Produce a total application order for colliding candidates.
    ///
    /// A non-empty input must yield a non-empty order; policies that fail
    /// to do so signal [`CollabError::ConflictUnresolved`].
    pub fn resolve(&self, candidates: Vec<Operation>) -> Result<Vec<Operation>, CollabError> {
        if candidates.is_empty() {
            return Ok(candidates);
        }
        let count = candidates.len();

        let resolved = match self {
            ConflictPolicy::Merge => {
                let mut ordered = candidates;
                // Stable: equal timestamps keep arrival order.
                ordered.sort_by_key(|op| op.issued_at);
                ordered
            }
            ConflictPolicy::Vote => {
                let mut groups: BTreeMap<(usize, OpKind), Vec<Operation>> = BTreeMap::new();
                for op in candidates {
                    groups.entry((op.position, op.kind)).or_default().push(op);
                }
                groups
                    .into_values()
                    .filter_map(|group| {
                        group.into_iter().reduce(|winner, current| {
                            if current.votes > winner.votes {
                                current
                            } else {
                                winner
                            }
                        })
                    })
                    .collect()
            }
            ConflictPolicy::Latest => candidates
                .into_iter()
                .reduce(|latest, current| {
                    if current.issued_at > latest.issued_at {
                        current
                    } else {
                        latest
                    }
                })
                .into_iter()
                .collect(),
        };

        if resolved.is_empty() {
            return Err(CollabError::ConflictUnresolved { candidates: count });
        }
        Ok(resolved)
    }
}
