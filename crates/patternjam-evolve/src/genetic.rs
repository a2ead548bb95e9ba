//! Genetic strategy: tournament selection, single-point crossover,
//! per-element mutation. No elitism.

use rand::Rng;
use rand_pcg::Pcg32;

use patternjam_core::{Element, Pattern};

/// Genetic operators parameterized by the engine config.
pub struct Genetic {
    pub mutation_rate: f64,
    pub tournament_size: usize,
}

impl Genetic {
    /// Tournament selection, sampled with replacement: each slot takes the
    /// fittest of `tournament_size` random draws.
    pub fn select(&self, population: &[Pattern], fitness: &[f64], rng: &mut Pcg32) -> Vec<Pattern> {
        (0..population.len())
            .map(|_| {
                let mut best = rng.gen_range(0..population.len());
                for _ in 1..self.tournament_size {
                    let candidate = rng.gen_range(0..population.len());
                    if fitness[candidate] > fitness[best] {
                        best = candidate;
                    }
                }
                population[best].clone()
            })
            .collect()
    }

    /// Single-point crossover producing two children.
    ///
    /// The split index is drawn uniformly from the first parent and
    /// clamped to the second parent's length.
    pub fn crossover(&self, a: &Pattern, b: &Pattern, rng: &mut Pcg32) -> (Pattern, Pattern) {
        let split = if a.is_empty() {
            0
        } else {
            rng.gen_range(0..a.len())
        };
        let split_b = split.min(b.len());

        let mut child1 = a.elements()[..split].to_vec();
        child1.extend_from_slice(&b.elements()[split_b..]);

        let mut child2 = b.elements()[..split_b].to_vec();
        child2.extend_from_slice(&a.elements()[split..]);

        (Pattern::new(child1), Pattern::new(child2))
    }

    /// Independently mutate each element with probability `mutation_rate`.
    pub fn mutate(&self, pattern: &Pattern, rng: &mut Pcg32) -> Pattern {
        self.mutate_with_rate(pattern, self.mutation_rate, rng)
    }

    pub fn mutate_with_rate(&self, pattern: &Pattern, rate: f64, rng: &mut Pcg32) -> Pattern {
        Pattern::new(
            pattern
                .iter()
                .map(|element| {
                    if rng.gen_bool(rate) {
                        perturb(element, rng)
                    } else {
                        element.clone()
                    }
                })
                .collect(),
        )
    }

    /// Selection, pairwise crossover, mutation. The best individual is
    /// not carried over.
    pub fn next_generation(
        &self,
        population: &[Pattern],
        fitness: &[f64],
        rng: &mut Pcg32,
    ) -> Vec<Pattern> {
        let parents = self.select(population, fitness, rng);
        let mut next = Vec::with_capacity(population.len());

        for pair in parents.chunks(2) {
            match pair {
                [a, b] => {
                    let (c1, c2) = self.crossover(a, b, rng);
                    next.push(self.mutate(&c1, rng));
                    if next.len() < population.len() {
                        next.push(self.mutate(&c2, rng));
                    }
                }
                [a] => next.push(self.mutate(a, rng)),
                _ => unreachable!(),
            }
        }
        next
    }
}

/// Replace an element with a randomly perturbed variant: nudged pitch,
/// halved/kept/doubled duration, jittered velocity.
pub fn perturb(element: &Element, rng: &mut Pcg32) -> Element {
    let mut out = element.clone();
    if let Some(pitch) = out.pitch {
        out.pitch = Some(pitch + rng.gen_range(-4..=4));
    }
    let factor = [0.5, 1.0, 2.0][rng.gen_range(0..3)];
    out.duration = (out.duration * factor).clamp(0.125, 4.0);
    out.velocity = (out.velocity + rng.gen_range(-0.2..=0.2)).clamp(0.05, 1.0);
    out
}
