//! The algorithm registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EvolveError;

/// The three interchangeable evolution strategies.
///
/// Dispatch is a `match` on this enum; string names exist only at the
/// CLI/transport boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmId {
    Genetic,
    Markov,
    Cellular,
}

impl AlgorithmId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::Genetic => "genetic",
            AlgorithmId::Markov => "markov",
            AlgorithmId::Cellular => "cellular",
        }
    }

    pub fn all() -> &'static [AlgorithmId] {
        &[
            AlgorithmId::Genetic,
            AlgorithmId::Markov,
            AlgorithmId::Cellular,
        ]
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = EvolveError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "genetic" => Ok(AlgorithmId::Genetic),
            "markov" => Ok(AlgorithmId::Markov),
            "cellular" => Ok(AlgorithmId::Cellular),
            _ => Err(EvolveError::UnknownAlgorithm {
                name: name.to_string(),
            }),
        }
    }
}
