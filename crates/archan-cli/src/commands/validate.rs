//! Validate command implementation.

use anyhow::{bail, Result};

use crate::config_resolver::ConfigSource;

/// Runs the validate command.
pub fn run(source: &ConfigSource) -> Result<()> {
    let Some(path) = source.path() else {
        bail!("No configuration file found. Run `archan init` to create one.");
    };

    let config = super::load_config(source)?;
    let registry = super::registry();

    if let Err(e) = config.validate(&registry) {
        eprintln!("{:?}", miette::Report::new(e));
        bail!("Invalid configuration: {}", path.display());
    }

    println!("{} is valid", path.display());
    for (provider, analysis) in &config.analysis {
        println!(
            "  {:<24} {} checker(s)",
            analysis.name.as_deref().unwrap_or(provider),
            analysis.checkers.len()
        );
    }
    if !config.checkers.is_empty() {
        println!("  {:<24} {} checker(s)", "(input)", config.checkers.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_config_is_an_error() {
        assert!(run(&ConfigSource::Default).is_err());
    }

    #[test]
    fn accepts_known_plugins() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("archan.yml");
        fs::write(
            &path,
            "analysis:\n  archan.CSVInput:\n    arguments:\n      file_path: dsm.csv\n    checkers: [CM, archan.LeastCommonMechanism]\n",
        )
        .unwrap();
        assert!(run(&ConfigSource::Project(path)).is_ok());
    }

    #[test]
    fn rejects_unknown_checker_arguments() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("archan.toml");
        fs::write(
            &path,
            "[analysis.\"archan.CSVInput\".arguments]\nfile_path = \"dsm.csv\"\n\n[[analysis.\"archan.CSVInput\".checkers]]\nEOM = { arguments = { factor = 3 } }\n",
        )
        .unwrap();
        let err = run(&ConfigSource::Explicit(path)).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"), "{err}");
    }
}
