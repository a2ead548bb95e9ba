//! Seed command implementation
//!
//! Emits built-in rhythm presets as pattern JSON.

use anyhow::{bail, Result};
use std::process::ExitCode;

use patternjam_core::theory::{rhythm_seed, rhythm_seed_names};

/// Run the seed command.
pub fn run(name: Option<&str>, list: bool) -> Result<ExitCode> {
    if list {
        for name in rhythm_seed_names() {
            println!("{}", name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(name) = name else {
        bail!("either a preset name or --list is required");
    };
    let Some(pattern) = rhythm_seed(name) else {
        bail!(
            "unknown preset {} (available: {})",
            name,
            rhythm_seed_names().join(", ")
        );
    };
    println!("{}", serde_json::to_string_pretty(&pattern)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_known_presets() {
        for name in rhythm_seed_names() {
            assert!(run(Some(name), false).is_ok());
        }
    }

    #[test]
    fn lists_presets() {
        assert!(run(None, true).is_ok());
    }

    #[test]
    fn rejects_unknown_preset() {
        let err = run(Some("bossa"), false).unwrap_err();
        assert!(err.to_string().contains("four_on_floor"));
    }

    #[test]
    fn requires_name_or_list() {
        assert!(run(None, false).is_err());
    }
}
