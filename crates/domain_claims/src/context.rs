//! Evaluation context
//!
//! One context is built per validation run and shared read-only by every
//! rule in that run. The evaluation instant is injected by the caller so
//! time-based rules give the same answer in tests and in production.

use chrono::{DateTime, Utc};

use crate::claim::{normalize_code, Claim};
use crate::config::EngineConfig;

/// Immutable snapshot of a claim and the instant it is evaluated at
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    claim: &'a Claim,
    evaluated_at: DateTime<Utc>,
    config: &'a EngineConfig,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(claim: &'a Claim, evaluated_at: DateTime<Utc>, config: &'a EngineConfig) -> Self {
        Self {
            claim,
            evaluated_at,
            config,
        }
    }

    pub fn claim(&self) -> &'a Claim {
        self.claim
    }

    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }

    /// Distinct procedure codes across all lines, in first-seen order
    pub fn procedure_codes(&self) -> Vec<String> {
        distinct(
            self.claim
                .service_lines
                .iter()
                .filter_map(|line| line.normalized_procedure()),
        )
    }

    /// Distinct diagnosis codes across all lines, in first-seen order
    pub fn diagnosis_codes(&self) -> Vec<String> {
        distinct(
            self.claim
                .service_lines
                .iter()
                .flat_map(|line| line.diagnosis_codes.iter())
                .filter_map(|code| normalize_code(code)),
        )
    }

    /// Returns true if any line bills the given (normalized) procedure code
    pub fn has_procedure(&self, code: &str) -> bool {
        self.claim
            .service_lines
            .iter()
            .any(|line| line.normalized_procedure().as_deref() == Some(code))
    }
}

fn distinct(codes: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for code in codes {
        if !seen.contains(&code) {
            seen.push(code);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ServiceLine;
    use rust_decimal_macros::dec;

    #[test]
    fn test_codes_are_distinct_and_ordered() {
        let mut claim = Claim::new();
        claim.add_line(
            ServiceLine::new("96413", dec!(500))
                .with_diagnosis("c50.911")
                .with_diagnosis("Z51.11"),
        );
        claim.add_line(ServiceLine::new(" 96415", dec!(200)).with_diagnosis("C50.911"));
        claim.add_line(ServiceLine::new("96413", dec!(500)));

        let config = EngineConfig::default();
        let ctx = EvaluationContext::new(&claim, Utc::now(), &config);

        assert_eq!(ctx.procedure_codes(), vec!["96413", "96415"]);
        assert_eq!(ctx.diagnosis_codes(), vec!["C50.911", "Z51.11"]);
        assert!(ctx.has_procedure("96415"));
        assert!(!ctx.has_procedure("99213"));
    }
}
