//! Custom Test Assertions
//!
//! Assertion helpers for rule results that print the offending message
//! when they fail.

use domain_claims::{CheckKind, DenialCode, RuleResult, RuleStatus};

/// Finds the single result reported for `kind`
///
/// # Panics
///
/// Panics if there is not exactly one result for the check kind
pub fn result_for(results: &[RuleResult], kind: CheckKind) -> &RuleResult {
    let matching: Vec<&RuleResult> = results.iter().filter(|r| r.check_kind == kind).collect();
    assert_eq!(
        matching.len(),
        1,
        "Expected exactly one {} result, found {}",
        kind,
        matching.len()
    );
    matching[0]
}

/// Asserts that a result has the expected status
pub fn assert_status(result: &RuleResult, expected: RuleStatus) {
    assert_eq!(
        result.status, expected,
        "{} returned {} instead of {}: {}",
        result.check_kind, result.status, expected, result.message
    );
}

/// Asserts that a result carries the expected status and denial code
pub fn assert_denial_code(result: &RuleResult, status: RuleStatus, code: DenialCode) {
    assert_status(result, status);
    assert_eq!(
        result.denial_code,
        Some(code),
        "{} expected denial code {}: {}",
        result.check_kind,
        code,
        result.message
    );
}

/// Asserts that every result passed
pub fn assert_all_pass(results: &[RuleResult]) {
    for result in results {
        assert_status(result, RuleStatus::Pass);
    }
}

/// Asserts that a score is in `0..=100`
pub fn assert_score_in_range(score: u8) {
    assert!(score <= 100, "Score out of range: {}", score);
}
