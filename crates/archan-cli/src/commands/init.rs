//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r"# archan configuration
#
# Each key under `analysis` names a provider. Its data is checked by the
# listed checkers. Run `archan list-plugins` to see what is available.

analysis:
  archan.CSVInput:
    name: Project DSM
    arguments:
      file_path: dsm.csv
      categories_delimiter: ':'
    checkers:
      - archan.CompleteMediation
      - archan.EconomyOfMechanism:
          arguments:
            simplicity_factor: 2
      - archan.LeastCommonMechanism:
          arguments:
            independence_factor: 5
      - archan.LayeredArchitecture:
          allow_failure: true

  # archan.PythonImports:
  #   arguments:
  #     packages: [src/mypackage]
  #     depth: 2
  #     categories:
  #       mypackage.bus: broker
  #       mypackage.models: data
  #   checkers: [CM, EOM, LCM, LA]

# Checkers run against `archan check --input <file.csv>`.
checkers:
  - CM
  - EOM
  - LCM
  - LA
";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("archan.yml"), force)?;

    println!("Created archan.yml");
    println!("\nNext steps:");
    println!("  1. Edit archan.yml to describe your analyses");
    println!("  2. Run: archan check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archan_core::Config;

    #[test]
    fn default_config_is_valid() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        config.validate(&crate::commands::registry()).unwrap();
        assert_eq!(config.analysis.len(), 1);
        assert_eq!(config.checkers.len(), 4);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("archan.yml");
        std::fs::write(&path, "keep").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
