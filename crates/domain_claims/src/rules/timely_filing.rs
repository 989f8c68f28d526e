//! Timely filing window
//!
//! Elapsed days are counted on the calendar of the configured filing
//! timezone, from the date of service to the evaluation instant. A date of
//! service after the evaluation instant has a negative elapsed count and
//! passes; the count is still recorded in the metadata.

use core_kernel::elapsed_days;

use crate::context::EvaluationContext;
use crate::denial::DenialCode;
use crate::error::ClaimError;
use crate::reference::filing_window_days;
use crate::result::{CheckKind, RuleMetadata, RuleResult};
use super::ClaimRule;

pub struct TimelyFilingRule;

impl ClaimRule for TimelyFilingRule {
    fn id(&self) -> &str {
        "timely-filing"
    }

    fn name(&self) -> &str {
        "Timely Filing Window"
    }

    fn check_kind(&self) -> CheckKind {
        CheckKind::TimelyFiling
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<RuleResult, ClaimError> {
        let kind = self.check_kind();
        let config = ctx.config();
        let payer_id = ctx.claim().insurance.payer_id.clone();

        let window = payer_id
            .as_deref()
            .and_then(filing_window_days)
            .unwrap_or(config.default_filing_window_days);

        let Some(date_of_service) = ctx.claim().date_of_service else {
            return Ok(RuleResult::fail(
                kind,
                "Date of service is missing; the filing deadline cannot be determined",
            )
            .with_denial_code(DenialCode::Co16)
            .with_suggestion("Enter the date the services were rendered"));
        };

        let elapsed = elapsed_days(date_of_service, ctx.evaluated_at(), config.filing_timezone);
        let remaining = window - elapsed;
        let metadata = RuleMetadata::TimelyFiling {
            payer_id,
            filing_window_days: window,
            days_elapsed: elapsed,
            days_remaining: remaining,
        };

        if elapsed > window {
            return Ok(RuleResult::fail(
                kind,
                format!(
                    "Filing window of {} days expired {} day(s) ago",
                    window, elapsed - window
                ),
            )
            .with_denial_code(DenialCode::Co29)
            .with_suggestion("Submit only with proof of timely original filing or a payer-approved exception")
            .with_metadata(metadata));
        }

        if remaining <= config.near_deadline_threshold_days {
            return Ok(RuleResult::warning(
                kind,
                format!("{} day(s) left in the {}-day filing window", remaining, window),
            )
            .with_suggestion("Submit the claim promptly")
            .with_metadata(metadata));
        }

        Ok(RuleResult::pass(
            kind,
            format!("{} day(s) left in the {}-day filing window", remaining, window),
        )
        .with_metadata(metadata))
    }
}
