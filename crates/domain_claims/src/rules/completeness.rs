//! Required field check
//!
//! Missing patient name, provider NPI, date of service or member id makes a
//! claim unprocessable and fails the check; any other gap is a warning.

use rust_decimal::Decimal;

use crate::claim::{is_blank, Claim};
use crate::context::EvaluationContext;
use crate::denial::DenialCode;
use crate::error::ClaimError;
use crate::result::{CheckKind, RuleMetadata, RuleResult};
use super::ClaimRule;

pub struct DataCompletenessRule;

#[derive(Debug, Default)]
struct MissingFields {
    critical: Vec<String>,
    other: Vec<String>,
}

impl MissingFields {
    fn critical(&mut self, field: &str) {
        self.critical.push(field.to_string());
    }

    fn other(&mut self, field: impl Into<String>) {
        self.other.push(field.into());
    }

    fn all(&self) -> Vec<String> {
        self.critical.iter().chain(self.other.iter()).cloned().collect()
    }
}

fn collect_missing(claim: &Claim) -> MissingFields {
    let mut missing = MissingFields::default();

    if is_blank(&claim.patient.name) {
        missing.critical("patient name");
    }
    if is_blank(&claim.provider.npi) {
        missing.critical("provider NPI");
    }
    if claim.date_of_service.is_none() {
        missing.critical("date of service");
    }
    if is_blank(&claim.insurance.member_id) {
        missing.critical("insurance member ID");
    }

    if claim.patient.date_of_birth.is_none() {
        missing.other("patient date of birth");
    }
    if claim.patient.gender.is_none() {
        missing.other("patient gender");
    }
    if is_blank(&claim.insurance.payer_name) {
        missing.other("payer name");
    }
    if is_blank(&claim.provider.name) {
        missing.other("provider name");
    }
    if is_blank(&claim.place_of_service) {
        missing.other("place of service");
    }
    if claim.service_lines.is_empty() {
        missing.other("service lines");
    }

    for (index, line) in claim.service_lines.iter().enumerate() {
        let number = index + 1;
        if line.procedure_code.trim().is_empty() {
            missing.other(format!("line {} procedure code", number));
        }
        if line.diagnosis_codes.iter().all(|code| code.trim().is_empty()) {
            missing.other(format!("line {} diagnosis code", number));
        }
        if line.charge_amount <= Decimal::ZERO {
            missing.other(format!("line {} charge amount", number));
        }
    }

    missing
}

impl ClaimRule for DataCompletenessRule {
    fn id(&self) -> &str {
        "data-completeness"
    }

    fn name(&self) -> &str {
        "Data Completeness"
    }

    fn check_kind(&self) -> CheckKind {
        CheckKind::DataCompleteness
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<RuleResult, ClaimError> {
        let kind = self.check_kind();
        let missing = collect_missing(ctx.claim());
        let metadata = RuleMetadata::DataCompleteness {
            missing_critical: missing.critical.clone(),
            missing_other: missing.other.clone(),
        };

        if !missing.critical.is_empty() {
            return Ok(RuleResult::fail(
                kind,
                format!("Missing critical fields: {}", missing.critical.join(", ")),
            )
            .with_denial_code(DenialCode::Co16)
            .with_suggestion("Complete the required fields before submission")
            .with_metadata(metadata));
        }

        if !missing.other.is_empty() {
            return Ok(RuleResult::warning(
                kind,
                format!("Missing fields: {}", missing.all().join(", ")),
            )
            .with_suggestion("Fill in the remaining fields to avoid payer follow-up requests")
            .with_metadata(metadata));
        }

        Ok(RuleResult::pass(kind, "All required fields are present").with_metadata(metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{Gender, ServiceLine};
    use crate::config::EngineConfig;
    use crate::result::RuleStatus;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn complete_claim() -> Claim {
        let mut claim = Claim::new();
        claim.patient.name = Some("Jane Roe".to_string());
        claim.patient.date_of_birth = NaiveDate::from_ymd_opt(1970, 4, 2);
        claim.patient.gender = Some(Gender::Female);
        claim.insurance.member_id = Some("W123456789".to_string());
        claim.insurance.payer_name = Some("Aetna".to_string());
        claim.provider.npi = Some("1234567893".to_string());
        claim.provider.name = Some("Riverside Oncology".to_string());
        claim.date_of_service = NaiveDate::from_ymd_opt(2024, 5, 1);
        claim.place_of_service = Some("11".to_string());
        claim.add_line(ServiceLine::new("99213", dec!(120)).with_diagnosis("J02.9"));
        claim
    }

    fn run(claim: &Claim) -> RuleResult {
        let config = EngineConfig::default();
        let ctx = EvaluationContext::new(claim, Utc::now(), &config);
        DataCompletenessRule.evaluate(&ctx).unwrap()
    }

    #[test]
    fn test_complete_claim_passes() {
        assert_eq!(run(&complete_claim()).status, RuleStatus::Pass);
    }

    #[test]
    fn test_critical_fields_fail_and_list_only_critical() {
        let mut claim = complete_claim();
        claim.patient.name = None;
        claim.insurance.member_id = Some("   ".to_string());
        claim.place_of_service = None;

        let result = run(&claim);
        assert_eq!(result.status, RuleStatus::Fail);
        assert_eq!(result.denial_code, Some(DenialCode::Co16));
        assert!(result.message.contains("patient name"));
        assert!(result.message.contains("insurance member ID"));
        assert!(!result.message.contains("place of service"));
    }

    #[test]
    fn test_line_level_gaps_warn() {
        let mut claim = complete_claim();
        claim.add_line(ServiceLine::new("", dec!(0)));

        let result = run(&claim);
        assert_eq!(result.status, RuleStatus::Warning);
        assert!(result.denial_code.is_none());
        assert!(result.message.contains("line 2 procedure code"));
        assert!(result.message.contains("line 2 diagnosis code"));
        assert!(result.message.contains("line 2 charge amount"));
    }

    #[test]
    fn test_no_service_lines_warns() {
        let mut claim = complete_claim();
        claim.service_lines.clear();

        let result = run(&claim);
        assert_eq!(result.status, RuleStatus::Warning);
        assert!(result.message.contains("service lines"));
    }
}
