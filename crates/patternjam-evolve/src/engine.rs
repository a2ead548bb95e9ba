//! The generation loop and run records.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use patternjam_core::rng::{rng_for, rng_for_generation};
use patternjam_core::theory::Scale;
use patternjam_core::Pattern;

use crate::algorithm::AlgorithmId;
use crate::cellular::Grid;
use crate::config::EvolutionConfig;
use crate::error::EvolveError;
use crate::fitness::FitnessEvaluator;
use crate::genetic::Genetic;
use crate::markov::TransitionTable;

/// One scored round of the population. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub index: u32,
    pub population: Vec<Pattern>,
    pub fitness: Vec<f64>,
    pub best_index: usize,
    pub best_fitness: f64,
    pub average_fitness: f64,
}

/// A fully materialized evolution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionRun {
    pub algorithm: AlgorithmId,
    pub seed: u32,
    pub generations: Vec<Generation>,
    /// True when the run stopped early on a cancellation signal; the
    /// generations completed so far are retained.
    pub cancelled: bool,
}

impl EvolutionRun {
    /// Best individual of the final recorded generation.
    pub fn best_pattern(&self) -> Option<(&Pattern, f64)> {
        let last = self.generations.last()?;
        let pattern = last.population.get(last.best_index)?;
        Some((pattern, last.best_fitness))
    }
}

/// Cooperative cancellation, checked between generations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Orchestrates generations for one of the three strategies.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    evaluator: FitnessEvaluator,
}

impl Default for EvolutionEngine {
    fn default() -> Self {
        Self::new(EvolutionConfig::default())
    }
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig) -> Self {
        Self {
            config,
            evaluator: FitnessEvaluator::default(),
        }
    }

    pub fn with_evaluator(mut self, evaluator: FitnessEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Run `generations` rounds from `seed_pattern`, batch and
    /// synchronous. Each round scores the whole population, records the
    /// generation, and (unless final or cancelled) produces the next
    /// population with the selected algorithm.
    ///
    /// Generation N+1 depends on generation N's scores, so rounds are
    /// never parallelized across.
    pub fn evolve(
        &self,
        seed_pattern: &Pattern,
        algorithm: AlgorithmId,
        generations: u32,
        seed: u32,
        cancel: &CancelToken,
    ) -> Result<EvolutionRun, EvolveError> {
        if seed_pattern.is_empty() {
            return Err(EvolveError::EmptySeed);
        }

        let genetic = Genetic {
            mutation_rate: self.config.mutation_rate,
            tournament_size: self.config.tournament_size,
        };
        let target_len = seed_pattern.len();
        let mut markov_table = match algorithm {
            AlgorithmId::Markov => Some(TransitionTable::analyze(&[seed_pattern])),
            _ => None,
        };

        let mut population = self.initial_population(seed_pattern, &genetic, seed);
        let mut run = EvolutionRun {
            algorithm,
            seed,
            generations: Vec::with_capacity(generations as usize),
            cancelled: false,
        };

        for index in 0..generations {
            if cancel.is_cancelled() {
                run.cancelled = true;
                break;
            }

            let fitness: Vec<f64> = population
                .iter()
                .map(|individual| self.evaluator.score(individual, &self.config.weights))
                .collect();
            let (best_index, best_fitness) = fitness
                .iter()
                .copied()
                .enumerate()
                .fold((0, f64::MIN), |best, (i, score)| {
                    if score > best.1 {
                        (i, score)
                    } else {
                        best
                    }
                });
            let average_fitness = fitness.iter().sum::<f64>() / fitness.len() as f64;

            run.generations.push(Generation {
                index,
                population: population.clone(),
                fitness: fitness.clone(),
                best_index,
                best_fitness,
                average_fitness,
            });

            if index + 1 < generations {
                let mut rng = rng_for_generation(seed, algorithm.as_str(), index);
                population = match algorithm {
                    AlgorithmId::Genetic => {
                        genetic.next_generation(&population, &fitness, &mut rng)
                    }
                    AlgorithmId::Markov => {
                        let table = markov_table
                            .take()
                            .unwrap_or_else(|| TransitionTable::analyze(&[seed_pattern]))
                            .perturb(self.config.mutation_rate, &mut rng);
                        let next = (0..population.len())
                            .map(|_| table.generate(target_len, &mut rng))
                            .collect();
                        markov_table = Some(table);
                        next
                    }
                    AlgorithmId::Cellular => population
                        .iter()
                        .map(|individual| {
                            Grid::encode(
                                individual,
                                self.config.grid_width,
                                self.config.grid_height,
                            )
                            .step()
                            .decode(Scale::Pentatonic)
                        })
                        .collect(),
                };
            }
        }

        Ok(run)
    }

    /// Seed the population: the seed pattern itself plus mutated copies.
    fn initial_population(&self, seed_pattern: &Pattern, genetic: &Genetic, seed: u32) -> Vec<Pattern> {
        (0..self.config.population_size.max(1))
            .map(|i| {
                if i == 0 {
                    seed_pattern.clone()
                } else {
                    let mut rng = rng_for(seed, "initial_population", &i.to_string());
                    genetic.mutate_with_rate(seed_pattern, 0.3, &mut rng)
                }
            })
            .collect()
    }
}
