//! Immutable pattern snapshots.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::PatternError;

/// An ordered sequence of elements; one version of a composition fragment.
///
/// Patterns are value snapshots. Every accepted edit or evolution step
/// produces a new `Pattern`; existing snapshots are never mutated. Element
/// order is significant and defines playback order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern {
    elements: Vec<Element>,
}

impl Pattern {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Validate every element's duration and velocity.
    pub fn validate(&self) -> Result<(), PatternError> {
        for (index, element) in self.elements.iter().enumerate() {
            if element.duration <= 0.0 {
                return Err(PatternError::InvalidDuration {
                    index,
                    duration: element.duration,
                });
            }
            if !(0.0..=1.0).contains(&element.velocity) {
                return Err(PatternError::InvalidVelocity {
                    index,
                    velocity: element.velocity,
                });
            }
        }
        Ok(())
    }

    /// New snapshot with `payload` inserted at `position`.
    ///
    /// Callers must have bounds-checked `position <= len()`.
    pub fn with_insert(&self, position: usize, payload: &[Element]) -> Pattern {
        debug_assert!(position <= self.elements.len());
        let mut elements = Vec::with_capacity(self.elements.len() + payload.len());
        elements.extend_from_slice(&self.elements[..position]);
        elements.extend_from_slice(payload);
        elements.extend_from_slice(&self.elements[position..]);
        Pattern { elements }
    }

    /// New snapshot with `length` elements removed at `position`.
    ///
    /// Callers must have bounds-checked `position + length <= len()`.
    pub fn with_delete(&self, position: usize, length: usize) -> Pattern {
        debug_assert!(position + length <= self.elements.len());
        let mut elements = Vec::with_capacity(self.elements.len() - length);
        elements.extend_from_slice(&self.elements[..position]);
        elements.extend_from_slice(&self.elements[position + length..]);
        Pattern { elements }
    }

    /// New snapshot with `length` elements at `position` replaced by `payload`.
    pub fn with_replace(&self, position: usize, length: usize, payload: &[Element]) -> Pattern {
        debug_assert!(position + length <= self.elements.len());
        let mut elements =
            Vec::with_capacity(self.elements.len() - length + payload.len());
        elements.extend_from_slice(&self.elements[..position]);
        elements.extend_from_slice(payload);
        elements.extend_from_slice(&self.elements[position + length..]);
        Pattern { elements }
    }
}

impl From<Vec<Element>> for Pattern {
    fn from(elements: Vec<Element>) -> Self {
        Self { elements }
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
