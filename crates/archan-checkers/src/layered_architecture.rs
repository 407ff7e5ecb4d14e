//! LA: modules only depend on modules listed after them.

use archan_core::{Arguments, Category, CheckError, CheckOutcome, Checker, DesignStructureMatrix};

/// Layered architecture checker.
///
/// The DSM order defines the layers: an entity may depend on entities that
/// come before it, but not on later ones. Brokers are exempt, as are
/// dependencies inside one top-level package. A DSM without categories has
/// no brokers.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayeredArchitecture;

impl LayeredArchitecture {
    /// Creates the checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Checker for LayeredArchitecture {
    fn identifier(&self) -> &'static str {
        "archan.LayeredArchitecture"
    }

    fn codename(&self) -> &'static str {
        "LA"
    }

    fn name(&self) -> &'static str {
        "Layered Architecture"
    }

    fn description(&self) -> &'static str {
        "The DSM is lower triangular outside brokers and packages"
    }

    fn hint(&self) -> Option<&'static str> {
        Some(
            "Ensure that your applications are listed in the right order \
             when building the DSM, or remove dependencies.",
        )
    }

    fn check_dsm(
        &self,
        dsm: &DesignStructureMatrix,
        _args: &Arguments,
    ) -> Result<CheckOutcome, CheckError> {
        let is_broker =
            |i: usize| dsm.categories().is_some_and(|c| c[i] == Category::Broker);

        let mut messages = Vec::new();
        for i in 0..dsm.size() {
            for j in (i + 1)..dsm.size() {
                if is_broker(i) || is_broker(j) || dsm.package(i) == dsm.package(j) {
                    continue;
                }
                if dsm.dependency(i, j) > 0 {
                    messages.push(format!(
                        "  Dependency from {} to {} breaks the layered architecture.",
                        dsm.entity(i),
                        dsm.entity(j)
                    ));
                }
            }
        }

        Ok(CheckOutcome::from_violations(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archan_core::Status;

    fn dsm(
        entities: &[&str],
        categories: Option<Vec<Category>>,
        data: Vec<Vec<u32>>,
    ) -> DesignStructureMatrix {
        DesignStructureMatrix::new(
            entities.iter().map(|e| (*e).to_string()).collect(),
            categories,
            data,
        )
        .unwrap()
    }

    #[test]
    fn downward_dependencies_pass() {
        let d = dsm(
            &["core", "service", "web"],
            None,
            vec![vec![0, 0, 0], vec![1, 0, 0], vec![1, 1, 0]],
        );
        let outcome = LayeredArchitecture.check_dsm(&d, &Arguments::new()).unwrap();
        assert_eq!(outcome.status, Status::Passed);
    }

    #[test]
    fn upward_dependency_fails() {
        let d = dsm(
            &["core", "service", "web"],
            None,
            vec![vec![0, 0, 1], vec![1, 0, 0], vec![1, 1, 0]],
        );
        let outcome = LayeredArchitecture.check_dsm(&d, &Arguments::new()).unwrap();
        assert_eq!(outcome.status, Status::Failed);
        assert_eq!(
            outcome.messages,
            vec!["  Dependency from core to web breaks the layered architecture."]
        );
    }

    #[test]
    fn same_package_and_brokers_are_exempt() {
        let d = dsm(
            &["app.models", "app.views", "bus", "web"],
            Some(vec![
                Category::AppModule,
                Category::AppModule,
                Category::Broker,
                Category::AppModule,
            ]),
            vec![
                vec![0, 1, 1, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 1],
                vec![0, 0, 1, 0],
            ],
        );
        let outcome = LayeredArchitecture.check_dsm(&d, &Arguments::new()).unwrap();
        assert_eq!(outcome.status, Status::Passed);
    }
}
