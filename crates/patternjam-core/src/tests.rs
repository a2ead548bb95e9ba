//! Tests for the core data model.

use pretty_assertions::assert_eq;
use rand::Rng;

use crate::element::{Element, ElementKind};
use crate::error::{ErrorCode, PatternError};
use crate::id::PatternId;
use crate::pattern::Pattern;
use crate::rng::{rng_for, rng_for_generation};
use crate::store::{MemoryPatternStore, PatternStore};
use crate::theory::{rhythm_seed, rhythm_seed_names, Scale};

fn sample_pattern() -> Pattern {
    Pattern::new(vec![
        Element::note(60, 0.5, 0.8),
        Element::note(64, 0.5, 0.8),
        Element::chord(55, 1.0, 0.6),
        Element::drum_hit(0.25, 0.9),
    ])
}

#[test]
fn element_constructors() {
    let note = Element::note(60, 0.5, 0.8);
    assert_eq!(note.kind, ElementKind::Note);
    assert_eq!(note.pitch, Some(60));
    assert_eq!(note.pitch_class(), Some(0));

    let hit = Element::drum_hit(0.25, 0.9);
    assert_eq!(hit.kind, ElementKind::DrumHit);
    assert_eq!(hit.pitch, None);
    assert_eq!(hit.pitch_class(), None);

    let negative = Element::note(-3, 0.5, 0.5);
    assert_eq!(negative.pitch_class(), Some(9));
}

#[test]
fn pattern_validate_rejects_bad_duration() {
    let pattern = Pattern::new(vec![Element::note(60, 0.0, 0.5)]);
    let err = pattern.validate().unwrap_err();
    assert!(matches!(err, PatternError::InvalidDuration { index: 0, .. }));
    assert_eq!(err.code(), "CORE_001");
    assert_eq!(err.category(), "core");
}

#[test]
fn pattern_validate_rejects_bad_velocity() {
    let pattern = Pattern::new(vec![
        Element::note(60, 0.5, 0.5),
        Element::note(62, 0.5, 1.5),
    ]);
    let err = pattern.validate().unwrap_err();
    assert!(matches!(err, PatternError::InvalidVelocity { index: 1, .. }));
    assert_eq!(err.code(), "CORE_002");
}

#[test]
fn pattern_positional_edits() {
    let base = sample_pattern();

    let inserted = base.with_insert(1, &[Element::note(67, 0.5, 0.7)]);
    assert_eq!(inserted.len(), 5);
    assert_eq!(inserted.elements()[1].pitch, Some(67));
    assert_eq!(inserted.elements()[2].pitch, Some(64));
    // Original snapshot untouched.
    assert_eq!(base.len(), 4);

    let deleted = base.with_delete(1, 2);
    assert_eq!(deleted.len(), 2);
    assert_eq!(deleted.elements()[0].pitch, Some(60));
    assert_eq!(deleted.elements()[1].kind, ElementKind::DrumHit);

    let replaced = base.with_replace(0, 2, &[Element::note(72, 1.0, 0.5)]);
    assert_eq!(replaced.len(), 3);
    assert_eq!(replaced.elements()[0].pitch, Some(72));
}

#[test]
fn pattern_json_round_trip() {
    let pattern = sample_pattern();
    let json = serde_json::to_string(&pattern).unwrap();
    let back: Pattern = serde_json::from_str(&json).unwrap();
    assert_eq!(pattern, back);
}

#[test]
fn store_get_put() {
    let store = MemoryPatternStore::new();
    assert!(store.is_empty());
    assert_eq!(store.get(&PatternId::from("missing")), None);

    let pattern = sample_pattern();
    store.put(PatternId::from("p0"), pattern.clone());
    assert_eq!(store.get(&PatternId::from("p0")), Some(pattern));
    assert_eq!(store.len(), 1);

    // Overwriting the same id replaces the snapshot.
    store.put(PatternId::from("p0"), Pattern::empty());
    assert_eq!(store.get(&PatternId::from("p0")), Some(Pattern::empty()));
    assert_eq!(store.len(), 1);
}

#[test]
fn store_ids_are_sorted() {
    let store = MemoryPatternStore::new();
    store.put(PatternId::from("b"), Pattern::empty());
    store.put(PatternId::from("a"), Pattern::empty());
    let ids: Vec<String> = store.ids().iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn rng_same_inputs_same_stream() {
    let mut a = rng_for(42, "engine", "mutate");
    let mut b = rng_for(42, "engine", "mutate");
    for _ in 0..16 {
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}

#[test]
fn rng_different_labels_diverge() {
    let mut a = rng_for(42, "engine", "mutate");
    let mut b = rng_for(42, "engine", "crossover");
    let draws_a: Vec<u64> = (0..4).map(|_| a.gen()).collect();
    let draws_b: Vec<u64> = (0..4).map(|_| b.gen()).collect();
    assert_ne!(draws_a, draws_b);

    let mut g0 = rng_for_generation(42, "run", 0);
    let mut g1 = rng_for_generation(42, "run", 1);
    assert_ne!(g0.gen::<u64>(), g1.gen::<u64>());
}

#[test]
fn scale_quantize_snaps_to_degree() {
    // C# (pc 1) in C major snaps down to C.
    assert_eq!(Scale::Major.quantize(61, 0), 60);
    // F# (pc 6) in C major: F and G are equidistant, ties snap down to F.
    assert_eq!(Scale::Major.quantize(66, 0), 65);
    // In-scale pitches are untouched.
    assert_eq!(Scale::Major.quantize(64, 0), 64);
    // Chromatic is a no-op.
    assert_eq!(Scale::Chromatic.quantize(61, 0), 61);
}

#[test]
fn scale_degree_wraps_octaves() {
    assert_eq!(Scale::Pentatonic.degree_semitones(0), 0);
    assert_eq!(Scale::Pentatonic.degree_semitones(4), 9);
    assert_eq!(Scale::Pentatonic.degree_semitones(5), 12);
    assert_eq!(Scale::Pentatonic.degree_semitones(7), 16);
}

#[test]
fn rhythm_seeds_have_onsets() {
    for name in rhythm_seed_names() {
        let pattern = rhythm_seed(name).unwrap();
        assert!(!pattern.is_empty(), "preset {name} is empty");
        assert!(pattern.validate().is_ok());
        assert!(pattern
            .iter()
            .all(|el| el.kind == ElementKind::DrumHit && el.duration == 0.25));
    }
    assert!(rhythm_seed("unknown").is_none());
}

#[test]
fn four_on_floor_has_four_accented_hits() {
    let pattern = rhythm_seed("four_on_floor").unwrap();
    assert_eq!(pattern.len(), 4);
    assert!(pattern.iter().all(|el| el.velocity == 0.9));
}
