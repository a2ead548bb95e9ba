//! PatternJam CLI library.
//!
//! Command implementations live here so they can be tested; the binary in
//! `main.rs` only parses arguments and dispatches.

pub mod commands;
