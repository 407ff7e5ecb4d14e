//! # archan-checkers
//!
//! Built-in checkers for archan.
//!
//! Each checker verifies one secure design principle against a categorized
//! DSM.
//!
//! ## Available Checkers
//!
//! | Codename | Identifier | Description |
//! |----------|------------|-------------|
//! | CM | `archan.CompleteMediation` | Dependencies between modules go through allowed channels |
//! | EOM | `archan.EconomyOfMechanism` | Own code stays below a dependency budget |
//! | SOP | `archan.SeparationOfPrivileges` | Not implemented |
//! | LP | `archan.LeastPrivileges` | Not implemented |
//! | LCM | `archan.LeastCommonMechanism` | No module is shared by too many others |
//! | LA | `archan.LayeredArchitecture` | Modules only depend on earlier layers |
//! | OD | `archan.OpenDesign` | Not implemented |
//! | CC | `archan.CodeClean` | Not implemented |
//!
//! ## Usage
//!
//! ```ignore
//! use archan_core::Registry;
//!
//! let registry = Registry::new().checkers(archan_checkers::all_checkers());
//! assert!(registry.find_checker("CM").is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod complete_mediation;
mod economy_of_mechanism;
mod layered_architecture;
mod least_common_mechanism;
mod pending;
mod presets;

pub use complete_mediation::{mediation_matrix, CompleteMediation, Mediation};
pub use economy_of_mechanism::EconomyOfMechanism;
pub use layered_architecture::LayeredArchitecture;
pub use least_common_mechanism::LeastCommonMechanism;
pub use pending::{CodeClean, LeastPrivileges, OpenDesign, SeparationOfPrivileges};
pub use presets::{all_checkers, recommended_checkers, Preset};

/// Re-export core types for convenience.
pub use archan_core::{Checker, Status};

use archan_core::{Category, CheckError, DesignStructureMatrix};

fn require_categories(dsm: &DesignStructureMatrix) -> Result<&[Category], CheckError> {
    dsm.categories().ok_or(CheckError::MissingCategories)
}
