//! patternjam Collaborative Editing
//!
//! Reconciles concurrent edits from multiple participants into one
//! consistent pattern via operational transformation (OT), with pluggable
//! conflict-resolution policies.
//!
//! # Model
//!
//! A [`CollaborativeSession`] owns one evolving pattern lineage. Incoming
//! operations are rebased against every history entry newer than their base
//! version ([`transform`]), same-tick collisions between participants go
//! through the session's [`ConflictPolicy`], and accepted operations land in
//! an append-only history that can be replayed deterministically.
//!
//! The index-based transform rules here are a deliberate simplification
//! suited to small, short-lived sessions; see [`transform`] for the
//! overlapping-delete caveat.
//!
//! # Modules
//!
//! - [`op`]: operations and positional application
//! - [`transform`]: pure OT index-adjustment rules
//! - [`resolve`]: conflict-resolution policies
//! - [`session`]: the single-writer session state machine
//! - [`clock`]: the composition tick source and layer registry
//! - [`hub`]: the inbound-edit / outbound-broadcast boundary

pub mod clock;
pub mod error;
pub mod hub;
pub mod op;
pub mod participant;
pub mod resolve;
pub mod session;
pub mod transform;

pub use clock::{CompositionClock, Layer};
pub use error::CollabError;
pub use hub::SessionHub;
pub use op::{apply_operation, replay_history, OpKind, Operation};
pub use participant::Participant;
pub use resolve::ConflictPolicy;
pub use session::{CollaborativeSession, HistoryEntry, SessionState};
pub use transform::transform;
