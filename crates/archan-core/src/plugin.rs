//! Plugin traits for checkers and providers.

use crate::arguments::{ArgumentError, ArgumentSpec, Arguments};
use crate::context::ProviderContext;
use crate::dsm::{Data, DesignStructureMatrix, DsmError};
use crate::types::CheckOutcome;
use std::path::PathBuf;

/// Errors a checker can raise instead of producing an outcome.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The checker needs entity categories but the DSM has none.
    #[error("the DSM has no categories")]
    MissingCategories,

    /// The checker was handed data it does not understand.
    #[error("unsupported data: expected {expected}, got {actual}")]
    UnsupportedData {
        /// Kind of data the checker expects.
        expected: &'static str,
        /// Kind of data it received.
        actual: &'static str,
    },

    /// An argument is invalid.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// Errors a provider can raise while producing data.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// IO error reading an input.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Input could not be parsed.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path of the input.
        path: PathBuf,
        /// Parse error detail.
        message: String,
    },

    /// The produced matrix is inconsistent.
    #[error("invalid matrix: {0}")]
    Dsm(#[from] DsmError),

    /// An argument is invalid.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// An analysis rule applied to provider data.
///
/// # Example
///
/// ```ignore
/// use archan_core::{Arguments, CheckError, CheckOutcome, Checker, DesignStructureMatrix};
///
/// pub struct NoSelfLoops;
///
/// impl Checker for NoSelfLoops {
///     fn identifier(&self) -> &'static str { "example.NoSelfLoops" }
///     fn codename(&self) -> &'static str { "NSL" }
///     fn name(&self) -> &'static str { "No Self Loops" }
///
///     fn check_dsm(&self, dsm: &DesignStructureMatrix, _: &Arguments) -> Result<CheckOutcome, CheckError> {
///         let loops = (0..dsm.size())
///             .filter(|&i| dsm.dependency(i, i) > 0)
///             .map(|i| format!("  {} depends on itself", dsm.entity(i)))
///             .collect();
///         Ok(CheckOutcome::from_violations(loops))
///     }
/// }
/// ```
pub trait Checker: Send + Sync {
    /// Fully qualified identifier used in descriptors.
    fn identifier(&self) -> &'static str;

    /// Short codename (e.g. `CM`).
    fn codename(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    /// What the checker verifies.
    fn description(&self) -> &'static str {
        ""
    }

    /// Advice shown when the check fails.
    fn hint(&self) -> Option<&'static str> {
        None
    }

    /// Arguments the checker accepts.
    fn arguments(&self) -> &'static [ArgumentSpec] {
        &[]
    }

    /// Whether this checker can inspect the given data.
    ///
    /// Defaults to DSM data only.
    fn accepts(&self, data: &Data) -> bool {
        matches!(data, Data::Dsm(_))
    }

    /// Checks the data and returns an outcome.
    ///
    /// The default implementation unwraps a DSM and calls
    /// [`Checker::check_dsm`].
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be checked.
    fn check(&self, data: &Data, args: &Arguments) -> Result<CheckOutcome, CheckError> {
        match data {
            Data::Dsm(dsm) => self.check_dsm(dsm, args),
            other => Err(CheckError::UnsupportedData {
                expected: "DSM",
                actual: other.kind(),
            }),
        }
    }

    /// Checks a DSM.
    ///
    /// # Errors
    ///
    /// Returns an error if the DSM cannot be checked.
    fn check_dsm(
        &self,
        _dsm: &DesignStructureMatrix,
        _args: &Arguments,
    ) -> Result<CheckOutcome, CheckError> {
        Ok(CheckOutcome::not_implemented())
    }
}

/// Type alias for boxed `Checker` trait objects.
pub type CheckerBox = Box<dyn Checker>;

/// A source of analysis data.
pub trait Provider: Send + Sync {
    /// Fully qualified identifier used in descriptors.
    fn identifier(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    /// What data the provider produces.
    fn description(&self) -> &'static str {
        ""
    }

    /// Arguments the provider accepts.
    fn arguments(&self) -> &'static [ArgumentSpec] {
        &[]
    }

    /// Produces data.
    ///
    /// # Errors
    ///
    /// Returns an error if inputs cannot be read or are inconsistent.
    fn get_data(&self, ctx: &ProviderContext, args: &Arguments) -> Result<Data, ProviderError>;
}

/// Type alias for boxed `Provider` trait objects.
pub type ProviderBox = Box<dyn Provider>;
