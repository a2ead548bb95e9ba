//! Evolve command implementation
//!
//! Runs an evolution strategy over a pattern loaded from JSON and prints
//! per-generation fitness.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use patternjam_core::Pattern;
use patternjam_evolve::{AlgorithmId, CancelToken, EvolutionEngine};

/// Run the evolve command.
pub fn run(
    pattern_path: &str,
    algorithm: &str,
    generations: u32,
    seed: u32,
    output: Option<&str>,
) -> Result<ExitCode> {
    let content = fs::read_to_string(pattern_path)
        .with_context(|| format!("Failed to read pattern file: {}", pattern_path))?;
    let pattern: Pattern = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", pattern_path))?;
    let algorithm: AlgorithmId = algorithm.parse()?;

    let engine = EvolutionEngine::default();
    let run = engine.evolve(&pattern, algorithm, generations, seed, &CancelToken::new())?;

    println!(
        "{} {} generations of {} (seed {})",
        "Evolved".green().bold(),
        run.generations.len(),
        algorithm,
        seed
    );
    for generation in &run.generations {
        println!(
            "  gen {:>3}  best {:.4}  avg {:.4}",
            generation.index, generation.best_fitness, generation.average_fitness
        );
    }
    if let Some((best, fitness)) = run.best_pattern() {
        println!(
            "{} {} elements, fitness {:.4}",
            "best".cyan().bold(),
            best.len(),
            fitness
        );
    }

    if let Some(output) = output {
        let json = serde_json::to_string_pretty(&run)?;
        fs::write(output, json).with_context(|| format!("Failed to write {}", output))?;
        println!("Run written to {}", output);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use patternjam_core::Element;
    use std::io::Write;

    #[test]
    fn evolves_a_pattern_file() {
        let pattern = Pattern::new(vec![
            Element::note(60, 0.25, 0.8),
            Element::note(64, 0.25, 0.7),
            Element::drum_hit(0.25, 0.9),
        ]);
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "{}", serde_json::to_string(&pattern).unwrap()).unwrap();

        let out_dir = tempfile::tempdir().unwrap();
        let out_path = out_dir.path().join("run.json");

        run(
            input.path().to_str().unwrap(),
            "genetic",
            3,
            42,
            Some(out_path.to_str().unwrap()),
        )
        .unwrap();

        let written = fs::read_to_string(&out_path).unwrap();
        let parsed: patternjam_evolve::EvolutionRun = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.generations.len(), 3);
        assert_eq!(parsed.seed, 42);
    }

    #[test]
    fn rejects_missing_file() {
        assert!(run("/nonexistent/pattern.json", "genetic", 3, 42, None).is_err());
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(
            input,
            "{}",
            serde_json::to_string(&Pattern::new(vec![Element::note(60, 0.25, 0.8)])).unwrap()
        )
        .unwrap();
        assert!(run(input.path().to_str().unwrap(), "neural", 3, 42, None).is_err());
    }
}
