//! Markov strategy: first-order transition analysis and random-walk
//! generation over quantized element states.

use std::collections::BTreeMap;

use rand::Rng;
use rand_pcg::Pcg32;

use patternjam_core::{Element, ElementKind, Pattern};

/// A quantized element: the unit of transition analysis.
///
/// Duration is quantized to sixteenth steps (capped at a whole bar) and
/// velocity to four levels, so near-identical elements share a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    kind: ElementKind,
    pitch_class: Option<u8>,
    duration_steps: u8,
    velocity_level: u8,
}

impl State {
    pub fn from_element(element: &Element) -> Self {
        Self {
            kind: element.kind,
            pitch_class: element.pitch_class(),
            duration_steps: ((element.duration / 0.25).round() as i64).clamp(1, 16) as u8,
            velocity_level: ((element.velocity * 4.0) as i64).clamp(0, 3) as u8,
        }
    }

    pub fn to_element(self) -> Element {
        Element {
            kind: self.kind,
            // Re-anchor pitch classes in the middle octave.
            pitch: self.pitch_class.map(|pc| 60 + i16::from(pc)),
            duration: f64::from(self.duration_steps) * 0.25,
            velocity: (f64::from(self.velocity_level) + 0.5) / 4.0,
        }
    }
}

/// First-order transition weights between quantized states.
///
/// `BTreeMap` keys keep iteration (and therefore sampling order)
/// deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionTable {
    transitions: BTreeMap<State, BTreeMap<State, f64>>,
}

impl TransitionTable {
    /// Build the table from one or more seed patterns.
    ///
    /// A single-element pattern records a self-transition so generation
    /// can loop on the lone state.
    pub fn analyze(patterns: &[&Pattern]) -> Self {
        let mut transitions: BTreeMap<State, BTreeMap<State, f64>> = BTreeMap::new();
        for pattern in patterns {
            let states: Vec<State> = pattern.iter().map(State::from_element).collect();
            match states.as_slice() {
                [] => {}
                [only] => {
                    *transitions
                        .entry(*only)
                        .or_default()
                        .entry(*only)
                        .or_insert(0.0) += 1.0;
                }
                _ => {
                    for pair in states.windows(2) {
                        *transitions
                            .entry(pair[0])
                            .or_default()
                            .entry(pair[1])
                            .or_insert(0.0) += 1.0;
                    }
                }
            }
        }
        Self { transitions }
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    /// Sample a pattern of exactly `length` elements by random-walking
    /// the table from a randomly chosen start state.
    ///
    /// A state with no outgoing transitions loops on itself, so the
    /// output length never falls short.
    pub fn generate(&self, length: usize, rng: &mut Pcg32) -> Pattern {
        if self.transitions.is_empty() || length == 0 {
            return Pattern::empty();
        }

        let start_index = rng.gen_range(0..self.transitions.len());
        let mut current = *self
            .transitions
            .keys()
            .nth(start_index)
            .unwrap_or_else(|| unreachable!("index drawn from key count"));

        let mut elements = Vec::with_capacity(length);
        for _ in 0..length {
            elements.push(current.to_element());
            current = self.next_state(current, rng);
        }
        Pattern::new(elements)
    }

    fn next_state(&self, current: State, rng: &mut Pcg32) -> State {
        let Some(outgoing) = self.transitions.get(&current) else {
            return current;
        };
        let total: f64 = outgoing.values().sum();
        if total <= 0.0 {
            return current;
        }
        let mut draw = rng.gen::<f64>() * total;
        for (state, weight) in outgoing {
            draw -= weight;
            if draw <= 0.0 {
                return *state;
            }
        }
        current
    }

    /// Perturb each transition weight by up to ±20% with probability
    /// `mutation_rate`.
    pub fn perturb(&self, mutation_rate: f64, rng: &mut Pcg32) -> Self {
        let mut evolved = BTreeMap::new();
        for (state, outgoing) in &self.transitions {
            let mut next: BTreeMap<State, f64> = BTreeMap::new();
            for (target, weight) in outgoing {
                let weight = if rng.gen_bool(mutation_rate) {
                    weight * (0.8 + rng.gen::<f64>() * 0.4)
                } else {
                    *weight
                };
                next.insert(*target, weight);
            }
            evolved.insert(*state, next);
        }
        Self {
            transitions: evolved,
        }
    }
}
