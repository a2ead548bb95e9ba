//! Fitness weights, sub-metric strategies, and the evaluator.
//!
//! Each sub-metric normalizes its own output to `[0,1]`; the evaluator
//! returns the weighted sum and never renormalizes the weights - keeping
//! them summing to 1.0 is the caller's responsibility.

use serde::{Deserialize, Serialize};

use patternjam_core::{ElementKind, Pattern};

/// Non-negative weights for the four sub-metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessWeights {
    pub rhythmic: f64,
    pub harmonic: f64,
    pub melodic: f64,
    pub preference: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            rhythmic: 0.25,
            harmonic: 0.25,
            melodic: 0.25,
            preference: 0.25,
        }
    }
}

impl FitnessWeights {
    pub fn sum(&self) -> f64 {
        self.rhythmic + self.harmonic + self.melodic + self.preference
    }
}

/// One swappable sub-metric, normalized to `[0,1]`.
///
/// The defaults below are cheap heuristics over the element sequence; a
/// concrete deployment can plug in real audio-feature analysis without
/// touching the combination contract.
pub trait Metric: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, pattern: &Pattern) -> f64;
}

/// Syncopation, variation, and density of the drum material.
pub struct RhythmicComplexity;

impl Metric for RhythmicComplexity {
    fn name(&self) -> &'static str {
        "rhythmic_complexity"
    }

    fn score(&self, pattern: &Pattern) -> f64 {
        let mut onset: f64 = 0.0;
        let mut hits = 0usize;
        let mut syncopated = 0usize;
        let mut buckets = std::collections::BTreeSet::new();

        for element in pattern {
            if element.kind == ElementKind::DrumHit {
                hits += 1;
                // Off-the-beat onsets read as syncopation.
                if (onset % 1.0).abs() > 1e-9 {
                    syncopated += 1;
                }
                buckets.insert((
                    (element.duration * 8.0).round() as i64,
                    (element.velocity * 8.0).round() as i64,
                ));
            }
            onset += element.duration;
        }

        if hits == 0 {
            return 0.0;
        }
        let syncopation = syncopated as f64 / hits as f64;
        let variation = buckets.len() as f64 / hits as f64;
        let density = hits as f64 / pattern.len() as f64;

        (syncopation * 0.4 + variation * 0.3 + density * 0.3).clamp(0.0, 1.0)
    }
}

/// Pitch-class diversity, chord density, and interval consonance.
pub struct HarmonicRichness;

impl Metric for HarmonicRichness {
    fn name(&self) -> &'static str {
        "harmonic_richness"
    }

    fn score(&self, pattern: &Pattern) -> f64 {
        let pitched: Vec<_> = pattern
            .iter()
            .filter(|el| {
                matches!(el.kind, ElementKind::Note | ElementKind::Chord) && el.pitch.is_some()
            })
            .collect();
        if pitched.is_empty() {
            return 0.0;
        }

        let classes: std::collections::BTreeSet<u8> =
            pitched.iter().filter_map(|el| el.pitch_class()).collect();
        // Seven distinct classes (a full diatonic set) counts as maximal.
        let diversity = (classes.len() as f64 / 7.0).min(1.0);

        let chords = pitched
            .iter()
            .filter(|el| el.kind == ElementKind::Chord)
            .count();
        let chord_density = chords as f64 / pitched.len() as f64;

        let consonant = pitched
            .windows(2)
            .filter(|pair| {
                let interval = (pair[1].pitch.unwrap_or(0) - pair[0].pitch.unwrap_or(0))
                    .unsigned_abs()
                    % 12;
                matches!(interval, 0 | 3 | 4 | 5 | 7 | 8 | 9)
            })
            .count();
        let consonance = if pitched.len() < 2 {
            0.5
        } else {
            consonant as f64 / (pitched.len() - 1) as f64
        };

        (diversity * 0.4 + chord_density * 0.3 + consonance * 0.3).clamp(0.0, 1.0)
    }
}

/// Contour variety, interval diversity, and register span of the melody.
pub struct MelodicInterest;

impl Metric for MelodicInterest {
    fn name(&self) -> &'static str {
        "melodic_interest"
    }

    fn score(&self, pattern: &Pattern) -> f64 {
        let notes: Vec<i16> = pattern
            .iter()
            .filter(|el| el.kind == ElementKind::Note)
            .filter_map(|el| el.pitch)
            .collect();
        if notes.is_empty() {
            return 0.0;
        }
        if notes.len() == 1 {
            return 0.25;
        }

        let intervals: Vec<i16> = notes.windows(2).map(|pair| pair[1] - pair[0]).collect();

        let direction_changes = intervals
            .windows(2)
            .filter(|pair| (pair[0] > 0) != (pair[1] > 0))
            .count();
        let contour = if intervals.len() < 2 {
            0.5
        } else {
            direction_changes as f64 / (intervals.len() - 1) as f64
        };

        let distinct: std::collections::BTreeSet<i16> =
            intervals.iter().map(|i| i.abs()).collect();
        let diversity = distinct.len() as f64 / intervals.len() as f64;

        let low = *notes.iter().min().unwrap_or(&0);
        let high = *notes.iter().max().unwrap_or(&0);
        // Two octaves of range counts as maximal.
        let range = (f64::from(high - low) / 24.0).min(1.0);

        (contour * 0.4 + diversity * 0.3 + range * 0.3).clamp(0.0, 1.0)
    }
}

/// Listening-profile affinity. Without a profile the score is neutral.
pub struct NeutralPreference;

impl Metric for NeutralPreference {
    fn name(&self) -> &'static str {
        "user_preference"
    }

    fn score(&self, _pattern: &Pattern) -> f64 {
        0.5
    }
}

/// Combines the four sub-metrics into one scalar score.
pub struct FitnessEvaluator {
    rhythmic: Box<dyn Metric>,
    harmonic: Box<dyn Metric>,
    melodic: Box<dyn Metric>,
    preference: Box<dyn Metric>,
}

impl Default for FitnessEvaluator {
    fn default() -> Self {
        Self {
            rhythmic: Box::new(RhythmicComplexity),
            harmonic: Box::new(HarmonicRichness),
            melodic: Box::new(MelodicInterest),
            preference: Box::new(NeutralPreference),
        }
    }
}

impl FitnessEvaluator {
    pub fn new(
        rhythmic: Box<dyn Metric>,
        harmonic: Box<dyn Metric>,
        melodic: Box<dyn Metric>,
        preference: Box<dyn Metric>,
    ) -> Self {
        Self {
            rhythmic,
            harmonic,
            melodic,
            preference,
        }
    }

    /// Swap in a real listening-profile metric.
    pub fn with_preference(mut self, preference: Box<dyn Metric>) -> Self {
        self.preference = preference;
        self
    }

    /// Weighted sum of the four sub-metrics.
    pub fn score(&self, pattern: &Pattern, weights: &FitnessWeights) -> f64 {
        self.rhythmic.score(pattern) * weights.rhythmic
            + self.harmonic.score(pattern) * weights.harmonic
            + self.melodic.score(pattern) * weights.melodic
            + self.preference.score(pattern) * weights.preference
    }
}
