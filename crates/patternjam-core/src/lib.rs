//! patternjam Core Library
//!
//! Shared data model for the collaborative pattern engine: musical elements
//! and immutable pattern snapshots, the pattern store contract, music-theory
//! tables, and deterministic RNG derivation.
//!
//! # Determinism
//!
//! All randomized behavior in the workspace draws from PCG32 generators
//! seeded via BLAKE3 hash derivation (see [`rng`]). Given the same seed and
//! labels, every downstream consumer produces identical output.
//!
//! # Modules
//!
//! - [`element`]: element kinds and per-element validation
//! - [`pattern`]: immutable pattern snapshots and positional edits
//! - [`store`]: the `PatternStore` contract and in-memory implementation
//! - [`theory`]: scale tables, pitch quantization, rhythm presets
//! - [`rng`]: seeded RNG derivation
//! - [`error`]: shared error-code trait and data-model errors

pub mod element;
pub mod error;
pub mod id;
pub mod pattern;
pub mod rng;
pub mod store;
pub mod theory;

pub use element::{Element, ElementKind};
pub use error::{ErrorCode, PatternError};
pub use id::{ParticipantId, PatternId, RunId, SessionId};
pub use pattern::Pattern;
pub use store::{MemoryPatternStore, PatternStore};

/// Crate version for engine identification.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests;
