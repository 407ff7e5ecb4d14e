//! Reading provider inputs from files or standard input.

use archan_core::{ProviderContext, ProviderError};
use std::io::Read;
use std::path::PathBuf;

/// Path argument value meaning "read standard input".
pub const STDIN: &str = "-";

/// Reads the whole input named by `file_path`, resolved against the project
/// root. Returns the path used, for error messages.
pub(crate) fn read_input(
    ctx: &ProviderContext,
    file_path: &str,
) -> Result<(PathBuf, String), ProviderError> {
    if file_path == STDIN {
        let path = PathBuf::from(STDIN);
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| ProviderError::Io {
                path: path.clone(),
                source: e,
            })?;
        return Ok((path, content));
    }

    let path = ctx.resolve(file_path);
    tracing::debug!("Reading {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(|e| ProviderError::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok((path, content))
}
