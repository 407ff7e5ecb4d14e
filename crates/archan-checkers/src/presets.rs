//! Checker presets for common configurations.

use crate::{
    CodeClean, CompleteMediation, EconomyOfMechanism, LayeredArchitecture, LeastCommonMechanism,
    LeastPrivileges, OpenDesign, SeparationOfPrivileges,
};
use archan_core::{CheckerBox, CheckerEntry};

/// Preset checker selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Checkers with an actual verification.
    Recommended,
    /// Every security design criterion, implemented or not.
    All,
}

impl Preset {
    /// Returns the checkers for this preset.
    #[must_use]
    pub fn checkers(self) -> Vec<CheckerBox> {
        match self {
            Self::Recommended => recommended_checkers(),
            Self::All => all_checkers(),
        }
    }

    /// Returns descriptor entries naming this preset's checkers.
    #[must_use]
    pub fn entries(self) -> Vec<CheckerEntry> {
        self.checkers()
            .iter()
            .map(|c| CheckerEntry::new(c.identifier()))
            .collect()
    }
}

/// Returns the checkers that verify something.
///
/// Includes:
/// - `CompleteMediation` (CM)
/// - `EconomyOfMechanism` (EOM)
/// - `LeastCommonMechanism` (LCM)
/// - `LayeredArchitecture` (LA)
#[must_use]
pub fn recommended_checkers() -> Vec<CheckerBox> {
    vec![
        Box::new(CompleteMediation::new()),
        Box::new(EconomyOfMechanism::new()),
        Box::new(LeastCommonMechanism::new()),
        Box::new(LayeredArchitecture::new()),
    ]
}

/// Returns all built-in checkers, in criteria order.
#[must_use]
pub fn all_checkers() -> Vec<CheckerBox> {
    vec![
        Box::new(CompleteMediation::new()),
        Box::new(EconomyOfMechanism::new()),
        Box::new(SeparationOfPrivileges::new()),
        Box::new(LeastPrivileges::new()),
        Box::new(LeastCommonMechanism::new()),
        Box::new(LayeredArchitecture::new()),
        Box::new(OpenDesign::new()),
        Box::new(CodeClean::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_checkers() {
        assert_eq!(Preset::Recommended.checkers().len(), 4);
        assert_eq!(Preset::All.checkers().len(), 8);
    }

    #[test]
    fn codenames_are_unique() {
        let mut codenames: Vec<_> = all_checkers().iter().map(|c| c.codename()).collect();
        codenames.sort_unstable();
        codenames.dedup();
        assert_eq!(codenames.len(), 8);
    }

    #[test]
    fn entries_use_full_identifiers() {
        let entries = Preset::Recommended.entries();
        assert_eq!(entries[0].identifier, "archan.CompleteMediation");
        assert!(entries.iter().all(|e| !e.options.allow_failure));
    }
}
