//! Scale tables, pitch quantization, and rhythm presets.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::pattern::Pattern;

/// Scales available for pitch quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Major,
    Minor,
    Dorian,
    Mixolydian,
    Pentatonic,
    Blues,
    WholeTone,
    Chromatic,
}

impl Scale {
    /// Semitone intervals from the root, within one octave.
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Scale::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Scale::Pentatonic => &[0, 2, 4, 7, 9],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
            Scale::WholeTone => &[0, 2, 4, 6, 8, 10],
            Scale::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        }
    }

    /// Scale degree for index `degree`, wrapping into higher octaves.
    pub fn degree_semitones(&self, degree: usize) -> i16 {
        let intervals = self.intervals();
        let octave = (degree / intervals.len()) as i16;
        octave * 12 + intervals[degree % intervals.len()] as i16
    }

    /// Snap a pitch to the nearest scale degree relative to `root_pc`.
    ///
    /// Ties snap down (toward the lower pitch).
    pub fn quantize(&self, pitch: i16, root_pc: u8) -> i16 {
        if *self == Scale::Chromatic {
            return pitch;
        }
        let note_pc = (pitch as i32 - root_pc as i32).rem_euclid(12) as u8;
        let quantized_pc = nearest_scale_degree(note_pc, self.intervals());
        pitch + quantized_pc as i16 - note_pc as i16
    }
}

/// Find the nearest scale degree to a given pitch class.
/// Ties snap down (toward lower pitch).
fn nearest_scale_degree(note_pc: u8, intervals: &[u8]) -> u8 {
    let mut best_interval = intervals[0];
    let mut best_distance = 12u8;

    for &interval in intervals {
        let dist_up = (12 + interval - note_pc) % 12;
        let dist_down = (12 + note_pc - interval) % 12;
        let distance = dist_up.min(dist_down);

        if distance < best_distance || (distance == best_distance && interval < best_interval) {
            best_distance = distance;
            best_interval = interval;
        }
    }

    best_interval
}

/// Built-in 16-step rhythm preset names.
pub fn rhythm_seed_names() -> &'static [&'static str] {
    &["four_on_floor", "breakbeat", "latin", "shuffle", "polyrhythm"]
}

/// Build a pattern from a named 16-step rhythm preset.
///
/// Each onset becomes one sixteenth-note drum hit; rests produce no
/// element, so pattern length equals the onset count.
pub fn rhythm_seed(name: &str) -> Option<Pattern> {
    let steps: &[u8; 16] = match name {
        "four_on_floor" => &[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
        "breakbeat" => &[1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0],
        "latin" => &[1, 0, 1, 0, 0, 1, 0, 1, 1, 0, 1, 0, 0, 1, 0, 0],
        "shuffle" => &[1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0],
        "polyrhythm" => &[1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 1],
        _ => return None,
    };

    let elements = steps
        .iter()
        .enumerate()
        .filter(|(_, &on)| on == 1)
        .map(|(step, _)| {
            // Accent downbeats.
            let velocity = if step % 4 == 0 { 0.9 } else { 0.7 };
            Element::drum_hit(0.25, velocity)
        })
        .collect();

    Some(Pattern::new(elements))
}
