//! The composition tick source and layer registry.
//!
//! Purely a scheduling utility: the clock advances a monotone beat
//! position and invokes layer callbacks; it never mutates session history.
//! The caller owns the timer loop (library code schedules nothing itself),
//! driving [`CompositionClock::tick`] once per [`CompositionClock::tick_period`].

use std::time::Duration;

use patternjam_core::Element;

/// One playback layer: a sub-pattern cycled by the clock.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    pub pattern: Vec<Element>,
    pub volume: f64,
    pub active: bool,
}

/// Deterministic tick generator driving layered playback.
#[derive(Debug)]
pub struct CompositionClock {
    bpm: u32,
    beat_position: u64,
    layers: Vec<Layer>,
}

impl CompositionClock {
    pub fn new(bpm: u32) -> Self {
        Self {
            bpm,
            beat_position: 0,
            layers: Vec::new(),
        }
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn beat_position(&self) -> u64 {
        self.beat_position
    }

    /// One sixteenth note at the session BPM.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(60.0 / f64::from(self.bpm) / 4.0)
    }

    /// Register or replace a layer by name. New layers start active.
    pub fn register_layer(&mut self, name: impl Into<String>, pattern: Vec<Element>, volume: f64) {
        let name = name.into();
        match self.layers.iter_mut().find(|l| l.name == name) {
            Some(layer) => {
                layer.pattern = pattern;
                layer.volume = volume;
            }
            None => self.layers.push(Layer {
                name,
                pattern,
                volume,
                active: true,
            }),
        }
    }

    /// Returns false if no layer has that name.
    pub fn set_layer_active(&mut self, name: &str, active: bool) -> bool {
        match self.layers.iter_mut().find(|l| l.name == name) {
            Some(layer) => {
                layer.active = active;
                true
            }
            None => false,
        }
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Advance one sixteenth and fire the trigger for each sounding layer.
    ///
    /// Each layer's own index is `beat_position mod len(pattern)`; the
    /// trigger is supplied by the audio subsystem.
    pub fn tick(&mut self, trigger: &mut dyn FnMut(&str, &Element, f64)) {
        self.beat_position += 1;
        for layer in &self.layers {
            if !layer.active || layer.pattern.is_empty() {
                continue;
            }
            let index = (self.beat_position % layer.pattern.len() as u64) as usize;
            trigger(&layer.name, &layer.pattern[index], layer.volume);
        }
    }
}
