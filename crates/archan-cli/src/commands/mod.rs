//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_plugins;
pub mod output;
pub mod validate;

use anyhow::{Context, Result};
use archan_core::{Config, Registry};

use crate::config_resolver::ConfigSource;

/// Registry of every built-in provider and checker.
pub fn registry() -> Registry {
    Registry::new()
        .providers(archan_providers::all_providers())
        .checkers(archan_checkers::all_checkers())
}

/// Loads the configuration from its resolved source.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            let p = other.path().context("resolved config has no path")?;
            tracing::info!("Using config: {other}");
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}
