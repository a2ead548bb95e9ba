//! Operational-transformation index rules.
//!
//! `transform(past, incoming)` rewrites a concurrently-issued operation's
//! coordinates relative to an already-applied one, so applying it after
//! `past` yields the same logical result as if both had been applied in
//! causal order. Pure and deterministic; validation against the current
//! pattern length happens at the session, never here, and positions are
//! never clamped.
//!
//! Overlapping deletes are merged by range expansion (minus what the past
//! delete already removed). That is a lossy simplification rather than a
//! true OT inverse; real collaborative editors use tombstones or unique
//! element identities. Good enough for small, short-lived sessions.

use crate::op::{OpKind, Operation};

/// Transform `incoming` against an already-applied `past` operation.
pub fn transform(past: &Operation, incoming: &Operation) -> Operation {
    match past.kind {
        OpKind::Insert => past_insert(past.position, past.payload.len(), incoming),
        OpKind::Delete => past_delete(past.position, past.length, incoming),
        OpKind::Modify => {
            // Modify composes as delete-then-insert at the same position.
            let after_delete = past_delete(past.position, past.length, incoming);
            past_insert(past.position, past.payload.len(), &after_delete)
        }
    }
}

/// A past insert shifts everything at or after its position.
fn past_insert(position: usize, inserted: usize, incoming: &Operation) -> Operation {
    let mut out = incoming.clone();
    if position <= incoming.position {
        out.position += inserted;
    }
    out
}

fn past_delete(position: usize, length: usize, incoming: &Operation) -> Operation {
    let mut out = incoming.clone();
    let past_end = position + length;

    if past_end <= incoming.position {
        // Fully precedes: shift left.
        out.position -= length;
    } else if position >= incoming.end() {
        // Fully follows: no change.
    } else if incoming.kind == OpKind::Insert {
        // Insert inside the deleted range lands at the deletion point.
        out.position = position;
    } else {
        // Overlapping ranges: cover the union span, minus the part the
        // past delete already removed.
        let overlap = incoming.end().min(past_end) - incoming.position.max(position);
        out.position = incoming.position.min(position);
        out.length = incoming.length - overlap;
    }
    out
}
