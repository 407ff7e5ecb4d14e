//! Context handed to providers.

use std::path::{Path, PathBuf};

/// Context about the project being analyzed.
#[derive(Debug, Clone)]
pub struct ProviderContext {
    /// Project root; relative paths in arguments are resolved against it.
    pub root: PathBuf,
}

impl ProviderContext {
    /// Creates a new provider context.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves a path argument against the project root.
    ///
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for ProviderContext {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_paths_against_root() {
        let ctx = ProviderContext::new("/project");
        assert_eq!(ctx.resolve("dsm.csv"), PathBuf::from("/project/dsm.csv"));
    }

    #[test]
    fn keeps_absolute_paths() {
        let ctx = ProviderContext::new("/project");
        assert_eq!(ctx.resolve("/data/dsm.csv"), PathBuf::from("/data/dsm.csv"));
    }
}
