//! Lookup of plugins by identifier.

use crate::plugin::{Checker, CheckerBox, Provider, ProviderBox};

/// Known checkers and providers.
///
/// An identifier resolves to a plugin when it equals the plugin's full
/// identifier, its last dot-separated segment, or (for checkers) its
/// codename. `archan.CompleteMediation`, `CompleteMediation` and `CM` all
/// name the same checker.
#[derive(Default)]
pub struct Registry {
    checkers: Vec<CheckerBox>,
    providers: Vec<ProviderBox>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field(
                "checkers",
                &self.checkers.iter().map(|c| c.identifier()).collect::<Vec<_>>(),
            )
            .field(
                "providers",
                &self.providers.iter().map(|p| p.identifier()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn short_name(identifier: &str) -> &str {
    identifier.rsplit('.').next().unwrap_or(identifier)
}

fn matches(query: &str, identifier: &str) -> bool {
    query == identifier || query == short_name(identifier)
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a checker.
    #[must_use]
    pub fn checker<C: Checker + 'static>(mut self, checker: C) -> Self {
        self.checkers.push(Box::new(checker));
        self
    }

    /// Registers boxed checkers.
    #[must_use]
    pub fn checkers(mut self, checkers: impl IntoIterator<Item = CheckerBox>) -> Self {
        self.checkers.extend(checkers);
        self
    }

    /// Registers a provider.
    #[must_use]
    pub fn provider<P: Provider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Registers boxed providers.
    #[must_use]
    pub fn providers(mut self, providers: impl IntoIterator<Item = ProviderBox>) -> Self {
        self.providers.extend(providers);
        self
    }

    /// Finds a checker by identifier, short name or codename.
    #[must_use]
    pub fn find_checker(&self, query: &str) -> Option<&dyn Checker> {
        self.checkers
            .iter()
            .find(|c| matches(query, c.identifier()) || query == c.codename())
            .map(AsRef::as_ref)
    }

    /// Finds a provider by identifier or short name.
    #[must_use]
    pub fn find_provider(&self, query: &str) -> Option<&dyn Provider> {
        self.providers
            .iter()
            .find(|p| matches(query, p.identifier()))
            .map(AsRef::as_ref)
    }

    /// All registered checkers, in registration order.
    pub fn all_checkers(&self) -> impl Iterator<Item = &dyn Checker> {
        self.checkers.iter().map(AsRef::as_ref)
    }

    /// All registered providers, in registration order.
    pub fn all_providers(&self) -> impl Iterator<Item = &dyn Provider> {
        self.providers.iter().map(AsRef::as_ref)
    }
}
