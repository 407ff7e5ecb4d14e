//! Criteria without an automated verification yet.
//!
//! They are listed so that descriptors can reference them and reports show
//! them as `NOT IMPLEMENTED` instead of silently dropping them.

use archan_core::Checker;

macro_rules! pending_checker {
    ($(#[$doc:meta])* $ty:ident, $identifier:literal, $codename:literal, $name:literal, $description:literal) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $ty;

        impl $ty {
            /// Creates the checker.
            #[must_use]
            pub fn new() -> Self {
                Self
            }
        }

        impl Checker for $ty {
            fn identifier(&self) -> &'static str {
                $identifier
            }

            fn codename(&self) -> &'static str {
                $codename
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn description(&self) -> &'static str {
                $description
            }
        }
    };
}

pending_checker!(
    /// Separation of privileges checker.
    SeparationOfPrivileges,
    "archan.SeparationOfPrivileges",
    "SOP",
    "Separation Of Privileges",
    "Privileged operations require more than one module"
);

pending_checker!(
    /// Least privileges checker.
    LeastPrivileges,
    "archan.LeastPrivileges",
    "LP",
    "Least Privileges",
    "Modules only access what they need"
);

pending_checker!(
    /// Open design checker.
    OpenDesign,
    "archan.OpenDesign",
    "OD",
    "Open Design",
    "Security does not depend on the secrecy of the design"
);

pending_checker!(
    /// Code clean checker.
    CodeClean,
    "archan.CodeClean",
    "CC",
    "Code Clean",
    "Application modules pass static code checks"
);

#[cfg(test)]
mod tests {
    use super::*;
    use archan_core::{Arguments, DesignStructureMatrix, Status};

    #[test]
    fn pending_checkers_report_not_implemented() {
        let dsm = DesignStructureMatrix::new(vec!["a".into()], None, vec![vec![0]]).unwrap();
        let data = dsm.into();
        let checkers: [&dyn Checker; 4] = [
            &SeparationOfPrivileges,
            &LeastPrivileges,
            &OpenDesign,
            &CodeClean,
        ];
        for checker in checkers {
            let outcome = checker.check(&data, &Arguments::new()).unwrap();
            assert_eq!(outcome.status, Status::NotImplemented, "{}", checker.name());
            assert!(checker.hint().is_none());
        }
    }
}
