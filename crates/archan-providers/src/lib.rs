//! # archan-providers
//!
//! Built-in data providers for archan.
//!
//! | Identifier | Produces | Source |
//! |------------|----------|--------|
//! | `archan.CSVInput` | DSM | CSV file or standard input |
//! | `archan.JSONInput` | DSM, DMM or MDM | JSON file or standard input |
//! | `archan.PythonImports` | DSM | `import` statements of Python packages |
//!
//! ```ignore
//! use archan_core::Registry;
//!
//! let registry = Registry::new().providers(archan_providers::all_providers());
//! assert!(registry.find_provider("CSVInput").is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod csv_input;
mod input;
mod json_input;
mod python_imports;

pub use category::CategoryResolver;
pub use csv_input::{parse_csv, CsvInput};
pub use input::STDIN;
pub use json_input::JsonInput;
pub use python_imports::PythonImports;

use archan_core::ProviderBox;

/// Returns all built-in providers.
#[must_use]
pub fn all_providers() -> Vec<ProviderBox> {
    vec![
        Box::new(CsvInput::new()),
        Box::new(JsonInput::new()),
        Box::new(PythonImports::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_unique() {
        let providers = all_providers();
        let mut ids: Vec<_> = providers.iter().map(|p| p.identifier()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), providers.len());
    }
}
