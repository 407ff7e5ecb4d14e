//! # archan-core
//!
//! Core framework for architecture analysis based on dependency structure
//! matrices (DSMs).
//!
//! This crate provides the data model and plumbing shared by providers,
//! checkers and the CLI. It includes:
//!
//! - [`DesignStructureMatrix`], [`DomainMappingMatrix`] and
//!   [`MultipleDomainMatrix`], wrapped in [`Data`]
//! - [`Provider`] trait for data sources
//! - [`Checker`] trait for analysis criteria
//! - [`Config`] for the YAML/TOML analysis descriptor
//! - [`Analyzer`] for running a descriptor and producing a [`Report`]
//!
//! ## Example
//!
//! ```ignore
//! use archan_core::{Analyzer, Config, Registry};
//!
//! let registry = Registry::new()
//!     .providers(archan_providers::all_providers())
//!     .checkers(archan_checkers::all_checkers());
//!
//! let analyzer = Analyzer::builder()
//!     .root(".")
//!     .registry(registry)
//!     .config(Config::from_file("archan.yml".as_ref())?)
//!     .build()?;
//!
//! let report = analyzer.analyze();
//! assert!(report.is_success());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod arguments;
mod config;
mod context;
mod dsm;
mod plugin;
mod registry;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use arguments::{ArgumentError, ArgumentSpec, Arguments};
pub use config::{
    AnalysisConfig, CheckerEntry, CheckerOptions, Config, ConfigError, INPUT_PROVIDER,
};
pub use context::ProviderContext;
pub use dsm::{
    Category, Data, DesignStructureMatrix, DomainMappingMatrix, DsmError, MultipleDomainMatrix,
};
pub use plugin::{CheckError, Checker, CheckerBox, Provider, ProviderBox, ProviderError};
pub use registry::Registry;
pub use types::{AnalysisReport, CheckOutcome, CheckerResult, Report, Status, StatusCounts};
