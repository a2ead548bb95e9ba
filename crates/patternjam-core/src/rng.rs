//! Deterministic RNG derivation.
//!
//! All randomized behavior is driven by PCG32 generators whose seeds are
//! derived by hashing the caller's seed together with domain labels. Same
//! inputs, same stream, on every platform.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Create a deterministic RNG from a seed, a component label, and a salt.
pub fn rng_for(seed: u32, label: &str, salt: &str) -> Pcg32 {
    let mut input = Vec::with_capacity(4 + label.len() + salt.len() + 2);
    input.extend_from_slice(&seed.to_le_bytes());
    input.push(0);
    input.extend_from_slice(label.as_bytes());
    input.push(0);
    input.extend_from_slice(salt.as_bytes());

    seed_from_hash(&input)
}

/// Create a deterministic RNG for one generation of an evolution run.
///
/// Deriving per generation keeps streams independent, so inserting or
/// removing draws inside one generation never perturbs the next.
pub fn rng_for_generation(seed: u32, label: &str, generation: u32) -> Pcg32 {
    let mut input = Vec::with_capacity(4 + label.len() + 5);
    input.extend_from_slice(&seed.to_le_bytes());
    input.push(0);
    input.extend_from_slice(label.as_bytes());
    input.push(0);
    input.extend_from_slice(&generation.to_le_bytes());

    seed_from_hash(&input)
}

fn seed_from_hash(input: &[u8]) -> Pcg32 {
    let hash = blake3::hash(input);
    let bytes: [u8; 4] = hash.as_bytes()[0..4]
        .try_into()
        .unwrap_or([0, 0, 0, 0]);
    let derived = u32::from_le_bytes(bytes);
    let seed64 = (derived as u64) | ((derived as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}
