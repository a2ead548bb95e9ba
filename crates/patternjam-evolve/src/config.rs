//! Engine tunables.

use serde::{Deserialize, Serialize};

use crate::fitness::FitnessWeights;

/// Tunables for an evolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// Per-element mutation probability (genetic) and per-transition
    /// perturbation probability (Markov).
    pub mutation_rate: f64,
    pub tournament_size: usize,
    pub grid_width: usize,
    pub grid_height: usize,
    pub weights: FitnessWeights,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 8,
            mutation_rate: 0.1,
            tournament_size: 3,
            grid_width: 16,
            grid_height: 8,
            weights: FitnessWeights::default(),
        }
    }
}
