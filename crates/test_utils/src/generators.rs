//! Property-Based Test Generators
//!
//! Provides proptest strategies for rule results and for arbitrary claims.
//! Generated claims draw codes from the reference tables as well as from
//! outside them, so both constrained and unconstrained paths get exercised.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_claims::{CheckKind, Claim, RuleResult, RuleStatus, ServiceLine};

use crate::fixtures::NpiFixtures;

const PROCEDURE_CODES: &[&str] = &[
    "96413", "96415", "96360", "99213", "99211", "36415", "80053", "82947", "59400", "59510",
    "97110", "J9355", "71046", "93000", "45378", "45380", "20610", "27130", "90837", "12345",
];

const DIAGNOSIS_CODES: &[&str] = &[
    "C50.911", "C34.90", "F41.1", "J06.9", "O80", "Z51.11", "M54.5", "I10", "E11.9", "R07.9",
];

const MODIFIER_CODES: &[&str] = &[
    "25", "59", "XU", "XS", "LT", "RT", "50", "26", "TC", "GP", "JW", "JZ", "91", "ZZ",
];

const PAYER_IDS: &[&str] = &["MEDICARE", "AETNA", "UHC", "BCBS", "UNKNOWN-PAYER"];

/// Strategy for generating rule statuses
pub fn status_strategy() -> impl Strategy<Value = RuleStatus> {
    prop_oneof![
        Just(RuleStatus::Pass),
        Just(RuleStatus::Warning),
        Just(RuleStatus::Fail),
    ]
}

/// Strategy for generating check kinds
pub fn check_kind_strategy() -> impl Strategy<Value = CheckKind> {
    prop::sample::select(CheckKind::ALL.to_vec())
}

/// Strategy for generating a single rule result
pub fn rule_result_strategy() -> impl Strategy<Value = RuleResult> {
    (check_kind_strategy(), status_strategy()).prop_map(|(kind, status)| match status {
        RuleStatus::Pass => RuleResult::pass(kind, "generated"),
        RuleStatus::Warning => RuleResult::warning(kind, "generated"),
        RuleStatus::Fail => RuleResult::fail(kind, "generated"),
    })
}

/// Strategy for generating result sets, possibly empty
pub fn result_set_strategy(max_len: usize) -> impl Strategy<Value = Vec<RuleResult>> {
    prop::collection::vec(rule_result_strategy(), 0..=max_len)
}

/// Strategy for generating provider identifiers with a valid check digit
pub fn valid_npi_strategy() -> impl Strategy<Value = String> {
    "[1-2][0-9]{8}".prop_map(|base| NpiFixtures::with_check_digit(&base))
}

/// Strategy for generating arbitrary provider identifier text
pub fn any_npi_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        valid_npi_strategy().prop_map(Some),
        "[0-9]{10}".prop_map(Some),
        "[0-9A-Z ]{0,12}".prop_map(Some),
    ]
}

fn code_strategy(codes: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::sample::select(codes).prop_map(|c| c.to_string())
}

/// Strategy for generating service lines
pub fn service_line_strategy() -> impl Strategy<Value = ServiceLine> {
    (
        code_strategy(PROCEDURE_CODES),
        prop::collection::vec(code_strategy(MODIFIER_CODES), 0..3),
        prop::collection::vec(code_strategy(DIAGNOSIS_CODES), 0..3),
        1u32..12,
        0i64..500_000,
    )
        .prop_map(|(procedure, modifiers, diagnoses, units, cents)| {
            let mut line = ServiceLine::new(procedure, Decimal::new(cents, 2)).with_units(units);
            line.modifiers = modifiers;
            line.diagnosis_codes = diagnoses;
            line
        })
}

/// Strategy for generating dates of service around the standard evaluation time
pub fn date_of_service_strategy() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::weighted(
        0.9,
        (-10i64..500).prop_map(crate::fixtures::TemporalFixtures::days_before_evaluation),
    )
}

/// Strategy for generating arbitrary, possibly incomplete claims
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (
        any_npi_strategy(),
        prop::option::of(code_strategy(PAYER_IDS)),
        date_of_service_strategy(),
        prop::collection::vec(service_line_strategy(), 0..6),
        any::<bool>(),
    )
        .prop_map(|(npi, payer, date_of_service, lines, named)| {
            let mut claim = Claim::new();
            claim.provider.npi = npi;
            claim.insurance.payer_id = payer;
            claim.insurance.member_id = Some("MBR0001".to_string());
            claim.date_of_service = date_of_service;
            claim.service_lines = lines;
            if named {
                claim.patient.name = Some("Generated Patient".to_string());
            }
            claim
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::rules::provider_id::is_valid_npi;
    use domain_claims::score;

    proptest! {
        #[test]
        fn generated_npis_are_valid(npi in valid_npi_strategy()) {
            prop_assert!(is_valid_npi(&npi));
        }

        #[test]
        fn generated_result_sets_score_in_range(results in result_set_strategy(20)) {
            prop_assert!(score(&results) <= 100);
        }

        #[test]
        fn generated_lines_have_units(line in service_line_strategy()) {
            prop_assert!(line.units >= 1);
            prop_assert!(line.charge_amount >= Decimal::ZERO);
        }
    }
}
