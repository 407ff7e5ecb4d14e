//! Category resolution: maps module names to entity categories.

use archan_core::{ArgumentError, Arguments, Category};
use indexmap::IndexMap;

/// Resolves fully-qualified module names to categories.
///
/// Resolution uses longest-prefix-match so that more specific module
/// prefixes take priority over broader ones.
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    /// (module_prefix, category) sorted by prefix length descending.
    map: Vec<(String, Category)>,
    default: Category,
}

impl CategoryResolver {
    /// Builds a resolver from prefix/category pairs.
    #[must_use]
    pub fn new(prefixes: impl IntoIterator<Item = (String, Category)>, default: Category) -> Self {
        let mut map: Vec<_> = prefixes.into_iter().collect();
        map.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { map, default }
    }

    /// Reads the `categories` map and `default_category` from arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if either argument has the wrong shape or names an
    /// unknown category.
    pub fn from_arguments(args: &Arguments) -> Result<Self, ArgumentError> {
        let raw: IndexMap<String, String> = args.get("categories")?.unwrap_or_default();
        let prefixes = raw
            .into_iter()
            .map(|(prefix, name)| {
                let category = name
                    .parse::<Category>()
                    .map_err(|e| ArgumentError::invalid("categories", e.to_string()))?;
                Ok((prefix, category))
            })
            .collect::<Result<Vec<_>, ArgumentError>>()?;

        let default = match args.get::<String>("default_category")? {
            Some(name) => name
                .parse::<Category>()
                .map_err(|e| ArgumentError::invalid("default_category", e.to_string()))?,
            None => Category::AppModule,
        };

        Ok(Self::new(prefixes, default))
    }

    /// Which category does this module belong to?
    #[must_use]
    pub fn resolve(&self, qualified_name: &str) -> Category {
        self.map
            .iter()
            .find(|(prefix, _)| {
                qualified_name == prefix
                    || qualified_name
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            })
            .map_or(self.default, |(_, category)| *category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> CategoryResolver {
        CategoryResolver::new(
            [
                ("shop".to_string(), Category::AppModule),
                ("shop.bus".to_string(), Category::Broker),
                ("shop.models".to_string(), Category::Data),
            ],
            Category::AppLib,
        )
    }

    #[test]
    fn resolves_exact_and_submodules() {
        let r = resolver();
        assert_eq!(r.resolve("shop"), Category::AppModule);
        assert_eq!(r.resolve("shop.orders.views"), Category::AppModule);
    }

    #[test]
    fn resolves_longest_prefix() {
        let r = resolver();
        assert_eq!(r.resolve("shop.bus.events"), Category::Broker);
        assert_eq!(r.resolve("shop.models"), Category::Data);
    }

    #[test]
    fn no_false_prefix_match() {
        let r = resolver();
        assert_eq!(r.resolve("shopping.cart"), Category::AppLib);
        assert_eq!(r.resolve("shop.business"), Category::AppModule);
    }

    #[test]
    fn reads_arguments() {
        let args: Arguments = serde_yaml::from_str(
            "categories:\n  lib: core_lib\n  app.db: data\ndefault_category: app_lib\n",
        )
        .unwrap();
        let r = CategoryResolver::from_arguments(&args).unwrap();
        assert_eq!(r.resolve("lib.x"), Category::CoreLib);
        assert_eq!(r.resolve("app.db"), Category::Data);
        assert_eq!(r.resolve("app"), Category::AppLib);
    }

    #[test]
    fn defaults_to_app_module() {
        let r = CategoryResolver::from_arguments(&Arguments::new()).unwrap();
        assert_eq!(r.resolve("anything"), Category::AppModule);
    }

    #[test]
    fn rejects_unknown_category() {
        let args = Arguments::new().with("default_category", "service");
        let err = CategoryResolver::from_arguments(&args).unwrap_err();
        assert!(err.to_string().contains("default_category"), "{err}");
    }
}
