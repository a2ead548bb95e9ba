//! Musical elements: the atoms a pattern is made of.

use serde::{Deserialize, Serialize};

/// What an element sounds like when played back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Note,
    Chord,
    DrumHit,
}

/// One timed event in a pattern.
///
/// `pitch` is a MIDI-style semitone number and is absent for unpitched
/// elements (drum hits). `duration` is in beats and must be positive;
/// `velocity` is normalized to `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<i16>,
    pub duration: f64,
    pub velocity: f64,
}

impl Element {
    pub fn note(pitch: i16, duration: f64, velocity: f64) -> Self {
        Self {
            kind: ElementKind::Note,
            pitch: Some(pitch),
            duration,
            velocity,
        }
    }

    pub fn chord(root: i16, duration: f64, velocity: f64) -> Self {
        Self {
            kind: ElementKind::Chord,
            pitch: Some(root),
            duration,
            velocity,
        }
    }

    pub fn drum_hit(duration: f64, velocity: f64) -> Self {
        Self {
            kind: ElementKind::DrumHit,
            pitch: None,
            duration,
            velocity,
        }
    }

    /// Pitch class (0-11) for pitched elements.
    pub fn pitch_class(&self) -> Option<u8> {
        self.pitch.map(|p| p.rem_euclid(12) as u8)
    }

    pub fn is_valid(&self) -> bool {
        self.duration > 0.0 && (0.0..=1.0).contains(&self.velocity)
    }
}
