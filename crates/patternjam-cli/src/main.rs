//! PatternJam CLI - tools for pattern evolution and session histories
//!
//! This binary provides commands for evolving patterns, emitting built-in
//! rhythm seeds, and replaying collaborative session histories.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use patternjam_cli::commands;

/// PatternJam - collaborative pattern engine tools
#[derive(Parser)]
#[command(name = "patternjam")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve a pattern loaded from JSON and print per-generation fitness
    Evolve {
        /// Path to the pattern JSON file
        #[arg(short, long)]
        pattern: String,

        /// Evolution strategy to run
        #[arg(short, long, default_value = "genetic", value_parser = ["genetic", "markov", "cellular"])]
        algorithm: String,

        /// Number of generations to run
        #[arg(short, long, default_value = "8")]
        generations: u32,

        /// Deterministic seed for the run
        #[arg(short, long, default_value = "0")]
        seed: u32,

        /// Output file path for the full run JSON (default: not written)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Emit a built-in rhythm preset as pattern JSON
    Seed {
        /// Preset name (four_on_floor, breakbeat, latin, shuffle, polyrhythm)
        name: Option<String>,

        /// List available preset names
        #[arg(long)]
        list: bool,
    },

    /// Replay a session history JSON file and print the resulting pattern
    Replay {
        /// Path to the history JSON file (array of operations)
        #[arg(short = 'i', long)]
        history: String,

        /// Pretty-print the output JSON
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evolve {
            pattern,
            algorithm,
            generations,
            seed,
            output,
        } => commands::evolve::run(&pattern, &algorithm, generations, seed, output.as_deref()),
        Commands::Seed { name, list } => commands::seed::run(name.as_deref(), list),
        Commands::Replay { history, pretty } => commands::replay::run(&history, pretty),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_evolve_defaults() {
        let cli = Cli::try_parse_from(["patternjam", "evolve", "--pattern", "p.json"]).unwrap();
        match cli.command {
            Commands::Evolve {
                pattern,
                algorithm,
                generations,
                seed,
                output,
            } => {
                assert_eq!(pattern, "p.json");
                assert_eq!(algorithm, "genetic");
                assert_eq!(generations, 8);
                assert_eq!(seed, 0);
                assert!(output.is_none());
            }
            _ => panic!("expected evolve command"),
        }
    }

    #[test]
    fn test_cli_parses_evolve_with_options() {
        let cli = Cli::try_parse_from([
            "patternjam",
            "evolve",
            "--pattern",
            "p.json",
            "--algorithm",
            "markov",
            "--generations",
            "12",
            "--seed",
            "7",
            "--output",
            "run.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Evolve {
                pattern,
                algorithm,
                generations,
                seed,
                output,
            } => {
                assert_eq!(pattern, "p.json");
                assert_eq!(algorithm, "markov");
                assert_eq!(generations, 12);
                assert_eq!(seed, 7);
                assert_eq!(output.as_deref(), Some("run.json"));
            }
            _ => panic!("expected evolve command"),
        }
    }

    #[test]
    fn test_cli_requires_pattern_for_evolve() {
        let err = Cli::try_parse_from(["patternjam", "evolve"]).err().unwrap();
        assert!(err.to_string().contains("--pattern"));
    }

    #[test]
    fn test_cli_rejects_unknown_algorithm() {
        let err = Cli::try_parse_from([
            "patternjam",
            "evolve",
            "--pattern",
            "p.json",
            "--algorithm",
            "neural",
        ])
        .err()
        .unwrap();
        assert!(err.to_string().contains("neural"));
    }

    #[test]
    fn test_cli_parses_seed_with_name() {
        let cli = Cli::try_parse_from(["patternjam", "seed", "breakbeat"]).unwrap();
        match cli.command {
            Commands::Seed { name, list } => {
                assert_eq!(name.as_deref(), Some("breakbeat"));
                assert!(!list);
            }
            _ => panic!("expected seed command"),
        }
    }

    #[test]
    fn test_cli_parses_seed_with_list() {
        let cli = Cli::try_parse_from(["patternjam", "seed", "--list"]).unwrap();
        match cli.command {
            Commands::Seed { name, list } => {
                assert!(name.is_none());
                assert!(list);
            }
            _ => panic!("expected seed command"),
        }
    }

    #[test]
    fn test_cli_parses_replay() {
        let cli =
            Cli::try_parse_from(["patternjam", "replay", "--history", "h.json", "--pretty"])
                .unwrap();
        match cli.command {
            Commands::Replay { history, pretty } => {
                assert_eq!(history, "h.json");
                assert!(pretty);
            }
            _ => panic!("expected replay command"),
        }
    }

    #[test]
    fn test_cli_requires_history_for_replay() {
        let err = Cli::try_parse_from(["patternjam", "replay"]).err().unwrap();
        assert!(err.to_string().contains("--history"));
    }
}
