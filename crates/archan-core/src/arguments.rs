//! Plugin arguments declared in the analysis descriptor.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Static description of an argument accepted by a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Argument name as written in the descriptor.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Whether the plugin cannot run without it.
    pub required: bool,
}

impl ArgumentSpec {
    /// Creates an optional argument.
    #[must_use]
    pub const fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: false,
        }
    }

    /// Creates a required argument.
    #[must_use]
    pub const fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: true,
        }
    }
}

/// Errors when reading an argument value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    /// A required argument is absent.
    #[error("missing required argument '{0}'")]
    Missing(String),

    /// An argument has the wrong type or an out-of-range value.
    #[error("invalid argument '{name}': {message}")]
    Invalid {
        /// Argument name.
        name: String,
        /// What was expected.
        message: String,
    },
}

impl ArgumentError {
    /// Creates an [`ArgumentError::Invalid`].
    #[must_use]
    pub fn invalid(name: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.to_string(),
            message: message.into(),
        }
    }
}

/// Arguments passed to a provider or checker.
///
/// Values keep their declaration order and are stored as YAML values, so
/// they can come from either a YAML or a TOML descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments(IndexMap<String, Value>);

impl Arguments {
    /// Creates an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an argument, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Returns the raw value of an argument.
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Iterates over argument names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns true if no arguments are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Deserializes an argument into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be converted.
    pub fn get<T: serde::de::DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<T>, ArgumentError> {
        self.0
            .get(name)
            .map(|v| {
                serde_yaml::from_value(v.clone())
                    .map_err(|e| ArgumentError::invalid(name, e.to_string()))
            })
            .transpose()
    }

    /// Gets a boolean argument with a default value.
    #[must_use]
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.0.get(name).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Gets an unsigned integer argument with a default value.
    #[must_use]
    pub fn get_u64(&self, name: &str, default: u64) -> u64 {
        self.0.get(name).and_then(Value::as_u64).unwrap_or(default)
    }

    /// Gets a positive integer argument, falling back to `default` when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is present but not a positive integer.
    pub fn positive_u64(&self, name: &str, default: u64) -> Result<u64, ArgumentError> {
        match self.0.get(name) {
            None => Ok(default),
            Some(v) => match v.as_u64() {
                Some(n) if n > 0 => Ok(n),
                _ => Err(ArgumentError::invalid(name, "expected a positive integer")),
            },
        }
    }

    /// Gets a string argument with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.0.get(name).and_then(Value::as_str).unwrap_or(default)
    }

    /// Gets a required string argument.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is missing or not a string.
    pub fn require_str(&self, name: &str) -> Result<&str, ArgumentError> {
        match self.0.get(name) {
            None => Err(ArgumentError::Missing(name.to_string())),
            Some(v) => v
                .as_str()
                .ok_or_else(|| ArgumentError::invalid(name, "expected a string")),
        }
    }

    /// Gets a string array argument. A single string counts as a one-element array.
    #[must_use]
    pub fn get_str_array(&self, name: &str) -> Vec<String> {
        match self.0.get(name) {
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl FromIterator<(String, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Arguments {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn typed_getters_fall_back_to_defaults() {
        let args = parse("flag: true\nfactor: 3\nname: csv\n");
        assert!(args.get_bool("flag", false));
        assert!(!args.get_bool("absent", false));
        assert_eq!(args.get_u64("factor", 2), 3);
        assert_eq!(args.get_u64("absent", 2), 2);
        assert_eq!(args.get_str("name", "x"), "csv");
        assert_eq!(args.get_str("factor", "x"), "x");
    }

    #[test]
    fn positive_u64_rejects_zero_and_strings() {
        let args = parse("zero: 0\ntext: five\nok: 7\n");
        assert_eq!(args.positive_u64("ok", 1), Ok(7));
        assert_eq!(args.positive_u64("absent", 5), Ok(5));
        assert!(args.positive_u64("zero", 1).is_err());
        assert!(args.positive_u64("text", 1).is_err());
    }

    #[test]
    fn require_str_reports_missing() {
        let args = Arguments::new().with("file_path", "dsm.csv");
        assert_eq!(args.require_str("file_path"), Ok("dsm.csv"));
        assert_eq!(
            args.require_str("delimiter"),
            Err(ArgumentError::Missing("delimiter".into()))
        );
    }

    #[test]
    fn str_array_accepts_scalar() {
        let args = parse("one: pkg\nmany: [a, b]\n");
        assert_eq!(args.get_str_array("one"), vec!["pkg"]);
        assert_eq!(args.get_str_array("many"), vec!["a", "b"]);
        assert!(args.get_str_array("none").is_empty());
    }

    #[test]
    fn generic_get_deserializes() {
        let args = parse("map: {a: app_lib}\n");
        let map: Option<IndexMap<String, String>> = args.get("map").unwrap();
        assert_eq!(map.unwrap()["a"], "app_lib");
        assert!(args.get::<u32>("map").is_err());
    }

    #[test]
    fn order_is_preserved() {
        let args = parse("z: 1\na: 2\nm: 3\n");
        assert_eq!(args.names().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }
}
