//! Core analyzer for running an analysis descriptor.

use crate::config::{AnalysisConfig, CheckerEntry, Config, ConfigError};
use crate::context::ProviderContext;
use crate::dsm::Data;
use crate::registry::Registry;
use crate::types::{AnalysisReport, CheckOutcome, CheckerResult, Report, Status};

use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that prevent an analysis from running at all.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No registry was supplied to the builder.
    #[error("Analyzer needs a plugin registry")]
    MissingRegistry,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    registry: Option<Registry>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project root used to resolve provider paths.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the plugin registry.
    #[must_use]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the analysis descriptor.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer, validating the descriptor against the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if no registry is set or the descriptor refers to
    /// unknown plugins or arguments.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let registry = self.registry.ok_or(AnalyzerError::MissingRegistry)?;
        let config = self.config.unwrap_or_default();
        config.validate(&registry)?;

        Ok(Analyzer {
            context: ProviderContext::new(self.root.unwrap_or_else(|| PathBuf::from("."))),
            registry,
            config,
        })
    }
}

/// Runs providers and checkers as described by a [`Config`].
pub struct Analyzer {
    context: ProviderContext,
    registry: Registry,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Number of analyses in the descriptor.
    #[must_use]
    pub fn analysis_count(&self) -> usize {
        self.config.analysis.len()
    }

    /// Runs every analysis in declaration order.
    #[must_use]
    pub fn analyze(&self) -> Report {
        let mut report = Report::new();
        for (provider_id, analysis) in &self.config.analysis {
            report.analyses.push(self.run_analysis(provider_id, analysis));
        }
        info!("{}", report.summary());
        report
    }

    fn run_analysis(&self, provider_id: &str, analysis: &AnalysisConfig) -> AnalysisReport {
        // Validated at build time.
        let provider = self.registry.find_provider(provider_id);
        let name = analysis
            .name
            .clone()
            .or_else(|| provider.map(|p| p.name().to_string()))
            .unwrap_or_else(|| provider_id.to_string());

        let mut report = AnalysisReport {
            provider: provider
                .map_or_else(|| provider_id.to_string(), |p| p.identifier().to_string()),
            name,
            description: analysis.description.clone(),
            data: None,
            error: None,
            allow_failure: analysis.allow_failure,
            results: Vec::new(),
        };

        let Some(provider) = provider else {
            report.error = Some(format!("unknown provider '{provider_id}'"));
            return report;
        };

        info!("Running analysis '{}' with {}", report.name, provider.identifier());
        let data = match provider.get_data(&self.context, &analysis.arguments) {
            Ok(data) => data,
            Err(e) => {
                if analysis.allow_failure {
                    warn!("Provider {} failed (allowed): {e}", provider.identifier());
                } else {
                    warn!("Provider {} failed: {e}", provider.identifier());
                }
                report.error = Some(e.to_string());
                return report;
            }
        };

        debug!("{} produced {}", provider.identifier(), data.summary());
        report.data = Some(data.summary());
        report.results = analysis
            .checkers
            .iter()
            .map(|entry| self.run_checker(entry, &data))
            .collect();
        report
    }

    fn run_checker(&self, entry: &CheckerEntry, data: &Data) -> CheckerResult {
        let checker = self.registry.find_checker(&entry.identifier);

        let outcome = match checker {
            None => CheckOutcome {
                status: Status::Failed,
                messages: vec![format!("unknown checker '{}'", entry.identifier)],
            },
            Some(_) if entry.options.ignore => CheckOutcome::ignored("ignored by configuration"),
            Some(checker) if !checker.accepts(data) => {
                CheckOutcome::ignored(format!("{} data is not supported", data.kind()))
            }
            Some(checker) => match checker.check(data, &entry.options.arguments) {
                Ok(outcome) => outcome,
                Err(e) => CheckOutcome::failed(vec![format!("  {e}")]),
            },
        };

        let result = CheckerResult {
            identifier: checker
                .map_or_else(|| entry.identifier.clone(), |c| c.identifier().to_string()),
            codename: checker.map(|c| c.codename().to_string()).unwrap_or_default(),
            name: entry
                .options
                .name
                .clone()
                .or_else(|| checker.map(|c| c.name().to_string()))
                .unwrap_or_else(|| entry.identifier.clone()),
            status: outcome.status,
            messages: outcome.messages,
            hint: checker.and_then(|c| c.hint()).map(String::from),
            allow_failure: entry.options.allow_failure,
        };

        if result.status == Status::Failed && result.allow_failure {
            warn!("{} failed (allowed)", result.name);
        } else {
            debug!("{}: {}", result.name, result.status);
        }
        result
    }
}
