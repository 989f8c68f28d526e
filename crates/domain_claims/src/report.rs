//! Validation report
//!
//! Packages one run's ordered results with the derived score. Whether a
//! failing report blocks submission is for the caller to decide.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ValidationRunId};

use crate::denial::DenialCode;
use crate::engine::score;
use crate::result::{RuleResult, RuleStatus};

/// Results of validating one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Unique identifier for this run
    pub run_id: ValidationRunId,
    /// Claim that was validated
    pub claim_id: ClaimId,
    /// Instant the rules were evaluated at
    pub evaluated_at: DateTime<Utc>,
    /// Results in selection order
    pub results: Vec<RuleResult>,
    /// Aggregate score, 0 to 100
    pub score: u8,
}

/// Number of results per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pass: usize,
    pub warning: usize,
    pub fail: usize,
}

impl ValidationReport {
    /// Creates a report, computing the score from `results`
    pub fn new(claim_id: ClaimId, evaluated_at: DateTime<Utc>, results: Vec<RuleResult>) -> Self {
        let score = score(&results);
        Self {
            run_id: ValidationRunId::new_v7(),
            claim_id,
            evaluated_at,
            results,
            score,
        }
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for result in &self.results {
            match result.status {
                RuleStatus::Pass => counts.pass += 1,
                RuleStatus::Warning => counts.warning += 1,
                RuleStatus::Fail => counts.fail += 1,
            }
        }
        counts
    }

    /// Returns true if any check failed
    pub fn has_blocking_failure(&self) -> bool {
        self.results.iter().any(RuleResult::is_fail)
    }

    /// Distinct denial codes raised, in result order
    pub fn denial_codes(&self) -> Vec<DenialCode> {
        let mut codes = Vec::new();
        for code in self.results.iter().filter_map(|r| r.denial_code) {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        codes
    }

    /// Worst status across all results; PASS when there are none
    pub fn overall_status(&self) -> RuleStatus {
        self.results
            .iter()
            .map(|r| r.status)
            .max()
            .unwrap_or(RuleStatus::Pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::CheckKind;

    fn report(results: Vec<RuleResult>) -> ValidationReport {
        ValidationReport::new(ClaimId::new_v7(), Utc::now(), results)
    }

    #[test]
    fn test_empty_report() {
        let report = report(Vec::new());
        assert_eq!(report.score, 100);
        assert_eq!(report.overall_status(), RuleStatus::Pass);
        assert!(!report.has_blocking_failure());
        assert!(report.denial_codes().is_empty());
    }

    #[test]
    fn test_counts_and_codes() {
        let report = report(vec![
            RuleResult::fail(CheckKind::ProviderId, "bad").with_denial_code(DenialCode::Co16),
            RuleResult::fail(CheckKind::DataCompleteness, "gaps").with_denial_code(DenialCode::Co16),
            RuleResult::warning(CheckKind::Bundling, "bundled").with_denial_code(DenialCode::Co97),
            RuleResult::pass(CheckKind::TimelyFiling, "ok"),
        ]);

        assert_eq!(
            report.counts(),
            StatusCounts {
                pass: 1,
                warning: 1,
                fail: 2
            }
        );
        assert_eq!(report.denial_codes(), vec![DenialCode::Co16, DenialCode::Co97]);
        assert!(report.has_blocking_failure());
        assert_eq!(report.overall_status(), RuleStatus::Fail);
        // (0 + 0 + 0.7 + 1.0) / 4 = 42.5
        assert_eq!(report.score, 43);
    }
}
