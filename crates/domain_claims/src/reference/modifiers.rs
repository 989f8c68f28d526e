//! Modifier reference table
//!
//! Per-modifier applicability and conflict data, plus the procedures that
//! payers will not process without one of a given set of modifiers.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Modifiers that mark a service as distinct from another on the same day
pub const DISTINCT_SERVICE_MODIFIERS: &[&str] = &["59", "XE", "XS", "XP", "XU"];

const EVALUATION_AND_MANAGEMENT: &[&str] = &[
    "99202", "99203", "99204", "99205", "99211", "99212", "99213", "99214", "99215",
];

const CLINICAL_LAB: &[&str] = &["80053", "82947", "84132", "82565", "85025", "36415"];

const DRUG_SUPPLY: &[&str] = &["J9355", "J9045", "J9271", "J1100", "J0897"];

/// What is known about one modifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierDefinition {
    pub name: &'static str,
    /// Procedures the modifier may be appended to; `None` means any
    pub applies_to: Option<&'static [&'static str]>,
    /// Modifiers that must not appear on the same line
    pub incompatible_with: &'static [&'static str],
    pub requires_documentation: bool,
}

const fn def(
    name: &'static str,
    applies_to: Option<&'static [&'static str]>,
    incompatible_with: &'static [&'static str],
    requires_documentation: bool,
) -> ModifierDefinition {
    ModifierDefinition {
        name,
        applies_to,
        incompatible_with,
        requires_documentation,
    }
}

static MODIFIERS: Lazy<HashMap<&'static str, ModifierDefinition>> = Lazy::new(|| {
    HashMap::from([
        (
            "25",
            def(
                "Significant, separately identifiable E/M service",
                Some(EVALUATION_AND_MANAGEMENT),
                &[],
                true,
            ),
        ),
        (
            "57",
            def("Decision for surgery", Some(EVALUATION_AND_MANAGEMENT), &[], true),
        ),
        (
            "24",
            def(
                "Unrelated E/M service during a postoperative period",
                Some(EVALUATION_AND_MANAGEMENT),
                &[],
                true,
            ),
        ),
        (
            "59",
            def("Distinct procedural service", None, &["XE", "XS", "XP", "XU"], true),
        ),
        ("XE", def("Separate encounter", None, &["59"], true)),
        ("XS", def("Separate structure", None, &["59"], true)),
        ("XP", def("Separate practitioner", None, &["59"], true)),
        ("XU", def("Unusual non-overlapping service", None, &["59"], true)),
        ("50", def("Bilateral procedure", None, &["LT", "RT"], false)),
        ("LT", def("Left side", None, &["RT", "50"], false)),
        ("RT", def("Right side", None, &["LT", "50"], false)),
        ("26", def("Professional component", None, &["TC"], false)),
        ("TC", def("Technical component", None, &["26"], false)),
        ("51", def("Multiple procedures", None, &[], false)),
        ("76", def("Repeat procedure by same physician", None, &["77"], true)),
        ("77", def("Repeat procedure by another physician", None, &["76"], true)),
        (
            "91",
            def("Repeat clinical diagnostic laboratory test", Some(CLINICAL_LAB), &[], false),
        ),
        (
            "JW",
            def("Drug amount discarded/not administered", Some(DRUG_SUPPLY), &["JZ"], true),
        ),
        (
            "JZ",
            def("Zero drug amount discarded", Some(DRUG_SUPPLY), &["JW"], false),
        ),
        ("GA", def("Waiver of liability statement issued", None, &["GZ", "GX"], true)),
        ("GZ", def("Item or service expected to be denied as not reasonable and necessary", None, &["GA"], false)),
        ("GX", def("Notice of liability issued, voluntary under payer policy", None, &["GA"], false)),
        ("GP", def("Services delivered under an outpatient physical therapy plan of care", None, &["GO", "GN"], false)),
        ("GO", def("Services delivered under an outpatient occupational therapy plan of care", None, &["GP", "GN"], false)),
        ("GN", def("Services delivered under an outpatient speech-language pathology plan of care", None, &["GP", "GO"], false)),
        ("KX", def("Requirements specified in the medical policy have been met", None, &[], true)),
    ])
});

static REQUIRED_MODIFIERS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("97110", &["GP", "GO", "GN"] as &[&str]),
        ("97140", &["GP", "GO", "GN"] as &[&str]),
        ("97530", &["GP", "GO", "GN"] as &[&str]),
        ("J9355", &["JW", "JZ"] as &[&str]),
        ("J9045", &["JW", "JZ"] as &[&str]),
        ("J9271", &["JW", "JZ"] as &[&str]),
    ])
});

/// Looks up a normalized modifier code
pub fn modifier_definition(code: &str) -> Option<&'static ModifierDefinition> {
    MODIFIERS.get(code)
}

/// Modifiers of which at least one must accompany the procedure
pub fn required_modifiers(procedure_code: &str) -> Option<&'static [&'static str]> {
    REQUIRED_MODIFIERS.get(procedure_code).copied()
}

impl ModifierDefinition {
    /// Returns true if the modifier may be used with `procedure_code`
    pub fn applies_to_procedure(&self, procedure_code: &str) -> bool {
        self.applies_to
            .map_or(true, |codes| codes.contains(&procedure_code))
    }

    pub fn conflicts_with(&self, other: &str) -> bool {
        self.incompatible_with.contains(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatibilities_are_symmetric() {
        for (code, definition) in MODIFIERS.iter() {
            for other in definition.incompatible_with {
                let reverse = modifier_definition(other)
                    .unwrap_or_else(|| panic!("{} lists unknown modifier {}", code, other));
                assert!(reverse.conflicts_with(code), "{} <-> {} not symmetric", code, other);
            }
        }
    }

    #[test]
    fn test_modifier_25_restricted_to_em() {
        let m25 = modifier_definition("25").unwrap();
        assert!(m25.applies_to_procedure("99213"));
        assert!(!m25.applies_to_procedure("96413"));
    }

    #[test]
    fn test_required_modifiers_for_therapy() {
        assert_eq!(required_modifiers("97110"), Some(&["GP", "GO", "GN"][..]));
        assert!(required_modifiers("99213").is_none());
    }
}
