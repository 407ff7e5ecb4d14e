//! Analysis descriptor: which providers run and which checkers inspect their data.
//!
//! ```yaml
//! analysis:
//!   archan.CSVInput:
//!     name: Project DSM
//!     arguments:
//!       file_path: dsm.csv
//!     checkers:
//!       - CompleteMediation
//!       - EconomyOfMechanism:
//!           allow_failure: true
//!           arguments:
//!             simplicity_factor: 2
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::arguments::{ArgumentSpec, Arguments};
use crate::registry::Registry;

/// Provider used for data given directly on the command line.
pub const INPUT_PROVIDER: &str = "archan.CSVInput";

/// Top-level analysis descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Analyses keyed by provider identifier, in declaration order.
    #[serde(default)]
    pub analysis: IndexMap<String, AnalysisConfig>,

    /// Checkers applied to data given directly on the command line.
    #[serde(default)]
    pub checkers: Vec<CheckerEntry>,
}

/// One provider and the checkers run against its data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisConfig {
    /// Display name (defaults to the provider's name).
    #[serde(default)]
    pub name: Option<String>,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether a provider error is tolerated.
    #[serde(default)]
    pub allow_failure: bool,

    /// Provider arguments.
    #[serde(default)]
    pub arguments: Arguments,

    /// Checkers to run, in order.
    #[serde(default)]
    pub checkers: Vec<CheckerEntry>,
}

impl AnalysisConfig {
    /// Creates an analysis with the given provider arguments and checkers.
    #[must_use]
    pub fn new(arguments: Arguments, checkers: Vec<CheckerEntry>) -> Self {
        Self {
            arguments,
            checkers,
            ..Self::default()
        }
    }
}

/// Per-checker options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckerOptions {
    /// Display name override.
    #[serde(default)]
    pub name: Option<String>,

    /// Whether a failure is tolerated.
    #[serde(default)]
    pub allow_failure: bool,

    /// Skip this checker entirely.
    #[serde(default)]
    pub ignore: bool,

    /// Checker arguments.
    #[serde(default)]
    pub arguments: Arguments,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCheckerEntry {
    Bare(String),
    Detailed(IndexMap<String, Option<CheckerOptions>>),
}

/// A checker reference: a bare identifier or an identifier with options.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawCheckerEntry")]
pub struct CheckerEntry {
    /// Checker identifier as written.
    pub identifier: String,
    /// Options for this checker.
    pub options: CheckerOptions,
}

impl TryFrom<RawCheckerEntry> for CheckerEntry {
    type Error = String;

    fn try_from(raw: RawCheckerEntry) -> Result<Self, Self::Error> {
        match raw {
            RawCheckerEntry::Bare(identifier) => Ok(Self::new(identifier)),
            RawCheckerEntry::Detailed(map) => {
                if map.len() != 1 {
                    return Err(format!(
                        "checker entry must have exactly one identifier, found {}",
                        map.len()
                    ));
                }
                let mut iter = map.into_iter();
                match iter.next() {
                    Some((identifier, options)) => Ok(Self {
                        identifier,
                        options: options.unwrap_or_default(),
                    }),
                    None => Err("empty checker entry".to_string()),
                }
            }
        }
    }
}

impl CheckerEntry {
    /// Creates an entry with default options.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            options: CheckerOptions::default(),
        }
    }

    /// Sets the `allow_failure` flag.
    #[must_use]
    pub fn allow_failure(mut self, allow: bool) -> Self {
        self.options.allow_failure = allow;
        self
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(archan::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(
        code(archan::config::parse),
        help("checkers are listed as `- Identifier` or `- Identifier: {{allow_failure: true}}`")
    )]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Config refers to unknown plugins or arguments.
    #[error("Invalid config:\n{}", .problems.iter().map(|p| format!("  - {p}")).collect::<Vec<_>>().join("\n"))]
    #[diagnostic(
        code(archan::config::invalid),
        help("run `archan list-plugins` to see available providers, checkers and arguments")
    )]
    Validation {
        /// Every problem found.
        problems: Vec<String>,
    },
}

impl Config {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file. Files ending in `.toml` are read
    /// as TOML, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::parse_toml(&content)
        } else {
            Self::parse(&content)
        }
    }

    /// Parses configuration from a YAML string.
    ///
    /// An empty document yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Replaces the analyses with one `archan.CSVInput` analysis using
    /// `arguments`. Its checkers are the top-level `checkers`, or
    /// `default_checkers` when none are listed.
    #[must_use]
    pub fn with_input(
        mut self,
        arguments: Arguments,
        default_checkers: Vec<CheckerEntry>,
    ) -> Self {
        let checkers = if self.checkers.is_empty() {
            default_checkers
        } else {
            self.checkers.clone()
        };

        let mut analysis = AnalysisConfig::new(arguments, checkers);
        if let Some(path) = analysis.arguments.raw("file_path").and_then(|v| v.as_str()) {
            analysis.name = Some(format!("Input {path}"));
        }

        self.analysis.clear();
        self.analysis.insert(INPUT_PROVIDER.to_string(), analysis);
        self
    }

    /// Returns true if there is nothing to analyze.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.analysis.is_empty()
    }

    /// Checks that every provider, checker and argument is known.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] listing every problem found.
    pub fn validate(&self, registry: &Registry) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        for (provider_id, analysis) in &self.analysis {
            let scope = format!("analysis.{provider_id}");
            match registry.find_provider(provider_id) {
                Some(provider) => {
                    check_arguments(
                        &scope,
                        provider.arguments(),
                        &analysis.arguments,
                        &mut problems,
                    );
                }
                None => problems.push(format!("{scope}: unknown provider '{provider_id}'")),
            }
            check_checkers(&scope, &analysis.checkers, registry, &mut problems);
        }
        check_checkers("checkers", &self.checkers, registry, &mut problems);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation { problems })
        }
    }
}

fn check_checkers(
    scope: &str,
    entries: &[CheckerEntry],
    registry: &Registry,
    problems: &mut Vec<String>,
) {
    for entry in entries {
        let scope = format!("{scope}.{}", entry.identifier);
        match registry.find_checker(&entry.identifier) {
            Some(checker) => {
                check_arguments(&scope, checker.arguments(), &entry.options.arguments, problems);
            }
            None => problems.push(format!("{scope}: unknown checker '{}'", entry.identifier)),
        }
    }
}

fn check_arguments(
    scope: &str,
    specs: &[ArgumentSpec],
    args: &Arguments,
    problems: &mut Vec<String>,
) {
    for name in args.names() {
        if !specs.iter().any(|s| s.name == name) {
            problems.push(format!("{scope}: unknown argument '{name}'"));
        }
    }
    for spec in specs.iter().filter(|s| s.required) {
        if args.raw(spec.name).is_none() {
            problems.push(format!("{scope}: missing required argument '{}'", spec.name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ProviderContext;
    use crate::dsm::{Data, DesignStructureMatrix};
    use crate::plugin::{Checker, Provider, ProviderError};

    struct Factor;

    impl Checker for Factor {
        fn identifier(&self) -> &'static str {
            "archan.EconomyOfMechanism"
        }
        fn codename(&self) -> &'static str {
            "EOM"
        }
        fn name(&self) -> &'static str {
            "Economy Of Mechanism"
        }
        fn arguments(&self) -> &'static [ArgumentSpec] {
            const ARGS: &[ArgumentSpec] =
                &[ArgumentSpec::optional("simplicity_factor", "factor")];
            ARGS
        }
    }

    struct Csv;

    impl Provider for Csv {
        fn identifier(&self) -> &'static str {
            "archan.CSVInput"
        }
        fn name(&self) -> &'static str {
            "CSV"
        }
        fn arguments(&self) -> &'static [ArgumentSpec] {
            const ARGS: &[ArgumentSpec] = &[ArgumentSpec::required("file_path", "path")];
            ARGS
        }
        fn get_data(&self, _: &ProviderContext, _: &Arguments) -> Result<Data, ProviderError> {
            Ok(DesignStructureMatrix::new(vec![], None, vec![])?.into())
        }
    }

    fn registry() -> Registry {
        Registry::new().checker(Factor).provider(Csv)
    }

    const YAML: &str = r"
analysis:
  archan.CSVInput:
    name: Project DSM
    arguments:
      file_path: dsm.csv
    checkers:
      - EconomyOfMechanism
      - EOM:
          allow_failure: true
          arguments:
            simplicity_factor: 3
      - archan.EconomyOfMechanism:
";

    #[test]
    fn parses_bare_and_detailed_checkers() {
        let config = Config::parse(YAML).unwrap();
        let analysis = &config.analysis["archan.CSVInput"];
        assert_eq!(analysis.name.as_deref(), Some("Project DSM"));
        assert_eq!(analysis.arguments.get_str("file_path", ""), "dsm.csv");
        assert_eq!(analysis.checkers.len(), 3);

        assert_eq!(analysis.checkers[0].identifier, "EconomyOfMechanism");
        assert!(!analysis.checkers[0].options.allow_failure);

        let detailed = &analysis.checkers[1];
        assert_eq!(detailed.identifier, "EOM");
        assert!(detailed.options.allow_failure);
        assert_eq!(detailed.options.arguments.get_u64("simplicity_factor", 0), 3);

        assert_eq!(analysis.checkers[2].identifier, "archan.EconomyOfMechanism");
        assert!(config.validate(&registry()).is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        let config = Config::parse("\n").unwrap();
        assert!(config.is_empty());
        assert!(config.checkers.is_empty());
    }

    #[test]
    fn rejects_multi_key_checker_entry() {
        let yaml = r"
checkers:
  - A: {}
    B: {}
";
        assert!(matches!(Config::parse(yaml), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn parses_toml() {
        let toml = r#"
[analysis."archan.CSVInput"]
arguments = { file_path = "dsm.csv" }
checkers = ["EOM", { LayeredArchitecture = { ignore = true } }]
"#;
        let config = Config::parse_toml(toml).unwrap();
        let analysis = &config.analysis["archan.CSVInput"];
        assert_eq!(analysis.checkers.len(), 2);
        assert!(analysis.checkers[1].options.ignore);
    }

    #[test]
    fn validation_collects_every_problem() {
        let yaml = r"
analysis:
  PylintProvider:
    checkers:
      - PylintChecker
  archan.CSVInput:
    arguments:
      delimiter: ';'
    checkers:
      - EOM:
          arguments:
            independence_factor: 5
";
        let config = Config::parse(yaml).unwrap();
        let Err(ConfigError::Validation { problems }) = config.validate(&registry()) else {
            panic!("expected validation error");
        };
        assert_eq!(
            problems,
            vec![
                "analysis.PylintProvider: unknown provider 'PylintProvider'",
                "analysis.PylintProvider.PylintChecker: unknown checker 'PylintChecker'",
                "analysis.archan.CSVInput: unknown argument 'delimiter'",
                "analysis.archan.CSVInput: missing required argument 'file_path'",
                "analysis.archan.CSVInput.EOM: unknown argument 'independence_factor'",
            ]
        );
    }

    #[test]
    fn input_replaces_analyses() {
        let config = Config::parse(YAML).unwrap().with_input(
            Arguments::new().with("file_path", "-"),
            vec![CheckerEntry::new("LA")],
        );
        assert_eq!(config.analysis.len(), 1);
        let analysis = &config.analysis[INPUT_PROVIDER];
        assert_eq!(analysis.name.as_deref(), Some("Input -"));
        assert_eq!(analysis.checkers[0].identifier, "LA");
    }

    #[test]
    fn input_prefers_top_level_checkers() {
        let config = Config::parse("checkers: [CM, EOM]\n")
            .unwrap()
            .with_input(Arguments::new(), vec![CheckerEntry::new("LA")]);
        let identifiers: Vec<_> = config.analysis[INPUT_PROVIDER]
            .checkers
            .iter()
            .map(|c| c.identifier.as_str())
            .collect();
        assert_eq!(identifiers, ["CM", "EOM"]);
    }

    #[test]
    fn from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("archan.yml");
        std::fs::write(&yaml, YAML).unwrap();
        assert_eq!(Config::from_file(&yaml).unwrap().analysis.len(), 1);

        let toml = dir.path().join("archan.toml");
        std::fs::write(&toml, "checkers = [\"CM\"]\n").unwrap();
        assert_eq!(Config::from_file(&toml).unwrap().checkers.len(), 1);

        let missing = dir.path().join("missing.yml");
        assert!(matches!(Config::from_file(&missing), Err(ConfigError::Io { .. })));
    }
}
