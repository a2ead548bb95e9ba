//! patternjam Evolutionary Generation
//!
//! Produces new pattern variants across generations using one of three
//! interchangeable strategies - genetic, Markov-chain, or cellular
//! automaton - scored by a pluggable fitness evaluator.
//!
//! # Determinism
//!
//! A run is fully determined by the seed pattern, the algorithm, the
//! generation count, and a `u32` seed: every generation derives its own
//! PCG32 stream via BLAKE3, so identical inputs reproduce identical runs.
//! There is deliberately no elitism; the best individual of one generation
//! may not survive into the next.
//!
//! # Modules
//!
//! - [`fitness`]: fitness weights, sub-metric strategies, the evaluator
//! - [`algorithm`]: the algorithm registry
//! - [`genetic`]: tournament selection, crossover, mutation
//! - [`markov`]: transition-table analysis and random-walk generation
//! - [`cellular`]: Conway-grid encoding and stepping
//! - [`engine`]: the generation loop and run records
//! - [`runner`]: background runs with start/poll semantics

pub mod algorithm;
pub mod cellular;
pub mod config;
pub mod engine;
pub mod error;
pub mod fitness;
pub mod genetic;
pub mod markov;
pub mod runner;

pub use algorithm::AlgorithmId;
pub use cellular::Grid;
pub use config::EvolutionConfig;
pub use engine::{CancelToken, EvolutionEngine, EvolutionRun, Generation};
pub use error::EvolveError;
pub use fitness::{FitnessEvaluator, FitnessWeights, Metric};
pub use markov::TransitionTable;
pub use runner::{EvolutionRunner, RunStatus};
