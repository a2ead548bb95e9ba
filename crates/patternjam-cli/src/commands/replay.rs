//! Replay command implementation
//!
//! Re-applies a stored session history against an empty pattern. History
//! entries are post-transform, so a clean history always reproduces the
//! session's final pattern.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use patternjam_collab::{replay_history, Operation};

/// Run the replay command.
pub fn run(history_path: &str, pretty: bool) -> Result<ExitCode> {
    let content = fs::read_to_string(history_path)
        .with_context(|| format!("Failed to read history file: {}", history_path))?;
    let ops: Vec<Operation> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", history_path))?;

    let pattern = replay_history(&ops)
        .with_context(|| format!("History in {} does not replay cleanly", history_path))?;

    eprintln!(
        "{} {} operations into {} elements",
        "Replayed".green().bold(),
        ops.len(),
        pattern.len()
    );
    let json = if pretty {
        serde_json::to_string_pretty(&pattern)?
    } else {
        serde_json::to_string(&pattern)?
    };
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use patternjam_core::Element;
    use std::io::Write;

    #[test]
    fn replays_a_history_file() {
        let ops = vec![
            Operation::insert("op-1", "alice", 0, 0, vec![Element::note(60, 0.25, 0.8)], 1),
            Operation::insert("op-2", "bob", 1, 1, vec![Element::note(64, 0.25, 0.7)], 2),
            Operation::delete("op-3", "alice", 2, 0, 1, 3),
        ];
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "{}", serde_json::to_string(&ops).unwrap()).unwrap();

        run(input.path().to_str().unwrap(), true).unwrap();
    }

    #[test]
    fn rejects_history_that_does_not_apply() {
        // Deleting from an empty base is out of range.
        let ops = vec![Operation::delete("op-1", "alice", 0, 4, 2, 1)];
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "{}", serde_json::to_string(&ops).unwrap()).unwrap();

        assert!(run(input.path().to_str().unwrap(), false).is_err());
    }

    #[test]
    fn rejects_missing_file() {
        assert!(run("/nonexistent/history.json", false).is_err());
    }
}
