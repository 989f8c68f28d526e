//! Procedure to diagnosis compatibility
//!
//! Codes are pooled across the whole claim: a diagnosis on any line can
//! support a procedure on any other line.

use crate::context::EvaluationContext;
use crate::denial::DenialCode;
use crate::error::ClaimError;
use crate::reference::{example_diagnoses, procedure_requirement};
use crate::result::{CheckKind, RuleMetadata, RuleResult};
use super::ClaimRule;

pub struct ProcedureDiagnosisRule;

impl ClaimRule for ProcedureDiagnosisRule {
    fn id(&self) -> &str {
        "procedure-diagnosis-compatibility"
    }

    fn name(&self) -> &str {
        "Procedure-Diagnosis Compatibility"
    }

    fn check_kind(&self) -> CheckKind {
        CheckKind::ProcedureDiagnosis
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<RuleResult, ClaimError> {
        let kind = self.check_kind();
        let procedures = ctx.procedure_codes();
        let diagnoses = ctx.diagnosis_codes();

        if procedures.is_empty() {
            return Ok(RuleResult::fail(kind, "No procedure codes on the claim")
                .with_denial_code(DenialCode::Co50)
                .with_suggestion("Add the CPT/HCPCS code for each billed service"));
        }

        if diagnoses.is_empty() {
            return Ok(RuleResult::fail(kind, "No diagnosis codes on the claim")
                .with_denial_code(DenialCode::Co11)
                .with_suggestion("Add at least one ICD-10 code establishing medical necessity"));
        }

        let mut checked = Vec::new();
        for code in &procedures {
            let Some(requirement) = procedure_requirement(code) else {
                continue;
            };
            if requirement.accepted_prefixes.is_empty() {
                return Err(ClaimError::rule_execution(
                    self.id(),
                    format!("reference entry for {} has no accepted diagnosis prefixes", code),
                ));
            }
            checked.push(code.clone());

            if diagnoses.iter().any(|dx| requirement.is_supported_by(dx)) {
                continue;
            }

            let suggestion = match example_diagnoses(code) {
                Some(examples) => format!("Supporting diagnoses include: {}", examples.join("; ")),
                None => format!(
                    "Use a diagnosis code starting with one of: {}",
                    requirement.accepted_prefixes.join(", ")
                ),
            };

            return Ok(RuleResult::fail(
                kind,
                format!(
                    "Procedure {} ({}) is not supported by any diagnosis on the claim ({})",
                    code,
                    requirement.description,
                    diagnoses.join(", ")
                ),
            )
            .with_denial_code(DenialCode::Co11)
            .with_suggestion(suggestion)
            .with_metadata(RuleMetadata::ProcedureDiagnosis {
                checked_codes: checked,
                unsupported_code: Some(code.clone()),
            }));
        }

        Ok(RuleResult::pass(
            kind,
            format!(
                "{} procedure code(s) checked against diagnosis requirements",
                checked.len()
            ),
        )
        .with_metadata(RuleMetadata::ProcedureDiagnosis {
            checked_codes: checked,
            unsupported_code: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{Claim, ServiceLine};
    use crate::config::EngineConfig;
    use crate::result::RuleStatus;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn run(claim: &Claim) -> RuleResult {
        let config = EngineConfig::default();
        let ctx = EvaluationContext::new(claim, Utc::now(), &config);
        ProcedureDiagnosisRule.evaluate(&ctx).unwrap()
    }

    #[test]
    fn test_diagnosis_on_other_line_supports_procedure() {
        let mut claim = Claim::new();
        claim.add_line(ServiceLine::new("96413", dec!(600)));
        claim.add_line(ServiceLine::new("99213", dec!(120)).with_diagnosis("c50.911"));

        let result = run(&claim);
        assert_eq!(result.status, RuleStatus::Pass);
        assert!(result.message.starts_with("1 procedure"));
    }

    #[test]
    fn test_example_suggestion_used_when_available() {
        let mut claim = Claim::new();
        claim.add_line(ServiceLine::new("96413", dec!(600)).with_diagnosis("F41.1"));

        let result = run(&claim);
        assert_eq!(result.status, RuleStatus::Fail);
        assert_eq!(result.denial_code, Some(DenialCode::Co11));
        assert!(result.suggestion.unwrap().contains("C50.911"));
    }

    #[test]
    fn test_generic_suggestion_lists_prefixes() {
        let mut claim = Claim::new();
        claim.add_line(ServiceLine::new("59400", dec!(3000)).with_diagnosis("J02.9"));

        let result = run(&claim);
        assert_eq!(result.status, RuleStatus::Fail);
        assert_eq!(
            result.suggestion.as_deref(),
            Some("Use a diagnosis code starting with one of: O, Z3")
        );
    }

    #[test]
    fn test_unconstrained_procedures_pass() {
        let mut claim = Claim::new();
        claim.add_line(ServiceLine::new("99213", dec!(120)).with_diagnosis("Z00.00"));

        let result = run(&claim);
        assert_eq!(result.status, RuleStatus::Pass);
        assert!(result.message.starts_with("0 procedure"));
    }

    #[test]
    fn test_missing_codes() {
        let mut claim = Claim::new();
        let result = run(&claim);
        assert_eq!(result.denial_code, Some(DenialCode::Co50));

        claim.add_line(ServiceLine::new("99213", dec!(120)));
        let result = run(&claim);
        assert_eq!(result.status, RuleStatus::Fail);
        assert_eq!(result.denial_code, Some(DenialCode::Co11));
    }
}
