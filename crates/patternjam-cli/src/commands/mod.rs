//! Command implementations for the `patternjam` binary.

pub mod evolve;
pub mod replay;
pub mod seed;
