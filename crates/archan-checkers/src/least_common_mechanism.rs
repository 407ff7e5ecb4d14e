//! LCM: no single module should be shared by too many others.

use archan_core::{
    ArgumentSpec, Arguments, Category, CheckError, CheckOutcome, Checker, DesignStructureMatrix,
};

use crate::require_categories;

const DEFAULT_INDEPENDENCE_FACTOR: u64 = 5;

const ARGUMENTS: &[ArgumentSpec] = &[ArgumentSpec::optional(
    "independence_factor",
    "Max dependents per module is size / factor (default: 5)",
)];

/// Least common mechanism checker.
///
/// For every entity, counts the entities depending on it (framework
/// excluded on both sides). Brokers and application libraries exist to be
/// shared and are exempt. The check passes when the largest count does not
/// exceed `size / independence_factor`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastCommonMechanism;

impl LeastCommonMechanism {
    /// Creates the checker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Checker for LeastCommonMechanism {
    fn identifier(&self) -> &'static str {
        "archan.LeastCommonMechanism"
    }

    fn codename(&self) -> &'static str {
        "LCM"
    }

    fn name(&self) -> &'static str {
        "Least Common Mechanism"
    }

    fn description(&self) -> &'static str {
        "No module is a dependency of too many other modules"
    }

    fn hint(&self) -> Option<&'static str> {
        Some("Reduce number of modules having dependencies to the listed module.")
    }

    fn arguments(&self) -> &'static [ArgumentSpec] {
        ARGUMENTS
    }

    #[allow(clippy::cast_precision_loss)]
    fn check_dsm(
        &self,
        dsm: &DesignStructureMatrix,
        args: &Arguments,
    ) -> Result<CheckOutcome, CheckError> {
        let factor = args.positive_u64("independence_factor", DEFAULT_INDEPENDENCE_FACTOR)?;
        let categories = require_categories(dsm)?;
        let size = dsm.size();

        let dependents: Vec<usize> = (0..size)
            .map(|j| {
                if matches!(categories[j], Category::Broker | Category::AppLib) {
                    return 0;
                }
                (0..size)
                    .filter(|&i| {
                        categories[i] != Category::Framework
                            && categories[j] != Category::Framework
                            && dsm.dependency(i, j) > 0
                    })
                    .count()
            })
            .collect();

        let threshold = size as f64 / factor as f64;
        // First entity with the highest count, matching declaration order.
        let worst = dependents
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, usize)>, (j, &n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((j, n)),
            });

        match worst {
            Some((j, max)) if max as f64 > threshold => Ok(CheckOutcome::failed(vec![format!(
                "  Dependencies to {} ({max}) > matrix size ({size}) \
                 / independence factor ({factor}) = {threshold:?}",
                dsm.entity(j)
            )])),
            _ => Ok(CheckOutcome::passed()),
        }
    }
}
