//! CM: every dependency between modules goes through an allowed channel.

use archan_core::{
    Arguments, Category, CheckError, CheckOutcome, Checker, DesignStructureMatrix,
};

use crate::require_categories;

/// Whether a cell of the mediation matrix tolerates dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mediation {
    /// Dependencies are tolerated.
    Tolerated,
    /// Dependencies must not be present.
    Forbidden,
}

/// Builds the mediation matrix for a categorized DSM.
///
/// Each entity may depend on itself and on entities of its own top-level
/// package. Beyond that:
///
/// | Row | Tolerated columns |
/// |-----|-------------------|
/// | framework | framework |
/// | core_lib | framework, core_lib |
/// | app_lib | framework, core_lib, app_lib |
/// | app_module | framework, core_lib, app_lib, broker, data |
/// | broker | framework, core_lib, app_module |
/// | data | framework |
///
/// Framework and data rows never get the same-package allowance.
///
/// # Errors
///
/// Returns [`CheckError::MissingCategories`] if the DSM has no categories.
pub fn mediation_matrix(dsm: &DesignStructureMatrix) -> Result<Vec<Vec<Mediation>>, CheckError> {
    let categories = require_categories(dsm)?;
    let size = dsm.size();

    let matrix = (0..size)
        .map(|i| {
            (0..size)
                .map(|j| {
                    let tolerated = match categories[i] {
                        Category::Framework => categories[j] == Category::Framework,
                        Category::Data => categories[j] == Category::Framework || i == j,
                        row => {
                            let allowed: &[Category] = match row {
                                Category::CoreLib => &[Category::Framework, Category::CoreLib],
                                Category::AppLib => {
                                    &[Category::Framework, Category::CoreLib, Category::AppLib]
                                }
                                Category::AppModule => &[
                                    Category::Framework,
                                    Category::CoreLib,
                                    Category::AppLib,
                                    Category::Broker,
                                    Category::Data,
                                ],
                                _ => &[Category::AppModule, Category::CoreLib, Category::Framework],
                            };
                            allowed.contains(&categories[j]) || i == j || same_package(dsm, i, j)
                        }
                    };
                    if tolerated {
                        Mediation::Tolerated
                    } else {
                        Mediation::Forbidden
                    }
                })
                .collect()
        })
        .collect();

    Ok(matrix)
}

/// Entity `i` lives inside the top-level package of entity `j`.
fn same_package(dsm: &DesignStructureMatrix, i: usize, j: usize) -> bool {
    dsm.entity(i)
        .strip_prefix(dsm.package(j))
        .is_some_and(|rest| rest.starts_with('.'))
}

/// Complete mediation checker.
///
/// Application modules must talk to each other through a broker, libraries
/// must not reach up into the application, and data modules depend on
/// nothing but the framework.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompleteMediation;

impl CompleteMediation {
    /// Creates the checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Checker for CompleteMediation {
    fn identifier(&self) -> &'static str {
        "archan.CompleteMediation"
    }

    fn codename(&self) -> &'static str {
        "CM"
    }

    fn name(&self) -> &'static str {
        "Complete Mediation"
    }

    fn description(&self) -> &'static str {
        "Every access to an application module is mediated by a broker"
    }

    fn hint(&self) -> Option<&'static str> {
        Some("Remove the dependencies or deviate them through a broker module.")
    }

    fn check_dsm(
        &self,
        dsm: &DesignStructureMatrix,
        _args: &Arguments,
    ) -> Result<CheckOutcome, CheckError> {
        let mediation = mediation_matrix(dsm)?;
        let mut messages = Vec::new();

        for (i, row) in mediation.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let count = dsm.dependency(i, j);
                if *cell == Mediation::Forbidden && count > 0 {
                    messages.push(format!(
                        "  Untolerated dependency at {i}:{j} ({}:{}): {count} instead of 0",
                        dsm.entity(i),
                        dsm.entity(j),
                    ));
                }
            }
        }

        Ok(CheckOutcome::from_violations(messages))
    }
}
