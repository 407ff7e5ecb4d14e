//! EOM: keep the number of dependencies in your own code low.

use archan_core::{
    ArgumentSpec, Arguments, Category, CheckError, CheckOutcome, Checker, DesignStructureMatrix,
};

use crate::require_categories;

const DEFAULT_SIMPLICITY_FACTOR: u64 = 2;

const ARGUMENTS: &[ArgumentSpec] = &[ArgumentSpec::optional(
    "simplicity_factor",
    "Allowed dependencies per module (default: 2)",
)];

/// Economy of mechanism checker.
///
/// Counts the dependencies between entities that are neither framework nor
/// core library. The check passes when that count stays below
/// `size * simplicity_factor`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EconomyOfMechanism;

impl EconomyOfMechanism {
    /// Creates the checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_third_party(category: Category) -> bool {
    matches!(category, Category::Framework | Category::CoreLib)
}

impl Checker for EconomyOfMechanism {
    fn identifier(&self) -> &'static str {
        "archan.EconomyOfMechanism"
    }

    fn codename(&self) -> &'static str {
        "EOM"
    }

    fn name(&self) -> &'static str {
        "Economy Of Mechanism"
    }

    fn description(&self) -> &'static str {
        "Own code has fewer dependencies than modules times the simplicity factor"
    }

    fn hint(&self) -> Option<&'static str> {
        Some(
            "Reduce the number of dependencies in your own code \
             or increase the simplicity factor.",
        )
    }

    fn arguments(&self) -> &'static [ArgumentSpec] {
        ARGUMENTS
    }

    fn check_dsm(
        &self,
        dsm: &DesignStructureMatrix,
        args: &Arguments,
    ) -> Result<CheckOutcome, CheckError> {
        let factor = args.positive_u64("simplicity_factor", DEFAULT_SIMPLICITY_FACTOR)?;
        let categories = require_categories(dsm)?;
        let size = dsm.size();
        if size == 0 {
            return Ok(CheckOutcome::passed());
        }

        let mut count: u64 = 0;
        for i in 0..size {
            for j in 0..size {
                if !is_third_party(categories[i])
                    && !is_third_party(categories[j])
                    && dsm.dependency(i, j) > 0
                {
                    count += 1;
                }
            }
        }

        let limit = size as u64 * factor;
        tracing::debug!("{count} dependencies in own code, limit {limit}");
        if count < limit {
            return Ok(CheckOutcome::passed());
        }

        Ok(CheckOutcome::failed(vec![format!(
            "  Number of dependencies ({count}) > number of rows ({size}) \
             * simplicity factor ({factor}) = {limit}"
        )]))
    }
}
