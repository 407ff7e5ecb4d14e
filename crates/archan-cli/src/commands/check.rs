//! Check command implementation.

use anyhow::{Context, Result};
use archan_checkers::Preset;
use archan_core::{Analyzer, Arguments, Config};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Options of the check command.
#[derive(Debug)]
pub struct CheckOptions<'a> {
    /// Project directory; provider paths resolve against it.
    pub path: &'a Path,
    /// Output format.
    pub format: OutputFormat,
    /// CSV DSM to check instead of the configured analyses.
    pub input: Option<&'a str>,
    /// Entity/category separator in the input's row names.
    pub categories_delimiter: Option<&'a str>,
    /// Use ANSI colors in text output.
    pub color: bool,
    /// Skip loading the configuration.
    pub no_config: bool,
    /// Resolved configuration location.
    pub source: &'a ConfigSource,
}

/// Runs the check command. Returns whether the report is successful.
pub fn run(options: &CheckOptions<'_>) -> Result<bool> {
    let mut config = if options.no_config {
        Config::default()
    } else {
        super::load_config(options.source)?
    };

    if let Some(input) = options.input {
        config = input_config(config, input, options.categories_delimiter);
    }

    if config.is_empty() {
        tracing::info!("Nothing to analyze: no configuration found and no input given");
        return Ok(true);
    }

    let analyzer = Analyzer::builder()
        .root(options.path)
        .registry(super::registry())
        .config(config)
        .build()
        .context("Invalid configuration")?;

    tracing::info!(
        "Analyzing {:?} with {} analysis(es)",
        options.path,
        analyzer.analysis_count()
    );

    let report = analyzer.analyze();
    super::output::print(&report, options.format, options.color)?;

    Ok(report.is_success())
}

fn input_config(config: Config, input: &str, categories_delimiter: Option<&str>) -> Config {
    let mut arguments = Arguments::new().with("file_path", input);
    if let Some(delimiter) = categories_delimiter {
        arguments = arguments.with("categories_delimiter", delimiter);
    }
    config.with_input(arguments, Preset::All.entries())
}
