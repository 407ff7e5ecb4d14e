//! Matrix data from a JSON document.

use archan_core::{ArgumentSpec, Arguments, Data, Provider, ProviderContext, ProviderError};

use crate::input::read_input;

const ARGUMENTS: &[ArgumentSpec] = &[ArgumentSpec::required(
    "file_path",
    "JSON file to read, `-` for standard input",
)];

/// Reads a DSM, DMM or MDM from JSON.
///
/// The document is the serialized form of [`Data`]:
///
/// ```json
/// {"type": "dsm", "entities": ["a", "b"], "data": [[0, 1], [0, 0]]}
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonInput;

impl JsonInput {
    /// Creates the provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Provider for JsonInput {
    fn identifier(&self) -> &'static str {
        "archan.JSONInput"
    }

    fn name(&self) -> &'static str {
        "JSON Input"
    }

    fn description(&self) -> &'static str {
        "Read a DSM, DMM or MDM from a JSON file or standard input"
    }

    fn arguments(&self) -> &'static [ArgumentSpec] {
        ARGUMENTS
    }

    fn get_data(&self, ctx: &ProviderContext, args: &Arguments) -> Result<Data, ProviderError> {
        let (path, content) = read_input(ctx, args.require_str("file_path")?)?;
        serde_json::from_str(&content).map_err(|e| ProviderError::Parse {
            path,
            message: e.to_string(),
        })
    }
}
