//! Locating the analysis descriptor.
//!
//! An explicit `--config` path wins. Otherwise the project directory is
//! searched for the names in [`PROJECT_CONFIG_NAMES`], and finally the
//! user's `config.yml` under `$ARCHAN_CONFIG_DIR` or `~/.archan/`.

use std::fmt;
use std::path::{Path, PathBuf};

/// Where the descriptor was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; not checked for existence.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// The user-wide descriptor.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the descriptor path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{}", p.display()),
            Self::Project(p) => write!(f, "{} (project)", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Default => f.write_str("no descriptor"),
        }
    }
}

/// Descriptor names searched in the project directory, first match wins.
pub const PROJECT_CONFIG_NAMES: &[&str] = &[
    "archan.yml",
    "archan.yaml",
    ".archan.yml",
    ".archan.yaml",
    "archan.toml",
    "config/archan.yml",
];

const GLOBAL_CONFIG_NAME: &str = "config.yml";

/// Resolves the descriptor for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir().as_deref())
}

fn resolve_in(project_dir: &Path, explicit: Option<&Path>, global: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    let found = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|path| path.is_file());
    if let Some(path) = found {
        tracing::debug!("Descriptor found in project: {}", path.display());
        return ConfigSource::Project(path);
    }
    global
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|path| path.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

/// User-wide configuration directory: `$ARCHAN_CONFIG_DIR`, else `~/.archan`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os("ARCHAN_CONFIG_DIR") {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|home| home.join(".archan")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "analysis: {}\n").unwrap();
    }

    #[test]
    fn explicit_path_is_taken_as_is() {
        let project = tempfile::tempdir().unwrap();
        touch(&project.path().join("archan.yml"));

        let source = resolve_in(project.path(), Some(Path::new("other.yml")), None);
        assert_eq!(source, ConfigSource::Explicit("other.yml".into()));
    }

    #[test]
    fn earlier_project_names_win() {
        let project = tempfile::tempdir().unwrap();
        for name in PROJECT_CONFIG_NAMES.iter().rev() {
            let path = project.path().join(name);
            touch(&path);
            assert_eq!(
                resolve_in(project.path(), None, None),
                ConfigSource::Project(path)
            );
        }
    }

    #[test]
    fn directory_named_like_a_descriptor_is_skipped() {
        let project = tempfile::tempdir().unwrap();
        fs::create_dir(project.path().join("archan.yml")).unwrap();
        touch(&project.path().join("archan.toml"));

        assert_eq!(
            resolve_in(project.path(), None, None),
            ConfigSource::Project(project.path().join("archan.toml"))
        );
    }

    #[test]
    fn global_descriptor_is_the_fallback() {
        let project = tempfile::tempdir().unwrap();
        let global = tempfile::tempdir().unwrap();
        assert_eq!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Default
        );

        let path = global.path().join("config.yml");
        touch(&path);
        let source = resolve_in(project.path(), None, Some(global.path()));
        assert_eq!(source, ConfigSource::Global(path));
        assert!(source.to_string().ends_with("(global)"));

        touch(&project.path().join(".archan.yaml"));
        assert!(matches!(
            resolve_in(project.path(), None, Some(global.path())),
            ConfigSource::Project(_)
        ));
    }
}
