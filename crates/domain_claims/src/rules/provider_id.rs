//! Provider identifier checksum
//!
//! A provider identifier is ten digits whose last digit is a Luhn check
//! digit computed over the identifier prefixed with the card issuer
//! constant `80840`.

use crate::context::EvaluationContext;
use crate::denial::DenialCode;
use crate::error::ClaimError;
use crate::result::{CheckKind, RuleMetadata, RuleResult};
use super::ClaimRule;

/// Issuer prefix applied before computing the check digit
pub const ISSUER_PREFIX: &str = "80840";

pub struct ProviderIdRule;

impl ClaimRule for ProviderIdRule {
    fn id(&self) -> &str {
        "provider-id-checksum"
    }

    fn name(&self) -> &str {
        "Provider ID Checksum"
    }

    fn check_kind(&self) -> CheckKind {
        CheckKind::ProviderId
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<RuleResult, ClaimError> {
        let kind = self.check_kind();
        let npi = ctx
            .claim()
            .provider
            .npi
            .as_deref()
            .filter(|v| !v.trim().is_empty());

        let Some(npi) = npi else {
            return Ok(RuleResult::fail(kind, "Provider NPI is missing")
                .with_denial_code(DenialCode::Co16)
                .with_suggestion("Enter the billing provider's 10-digit NPI")
                .with_metadata(RuleMetadata::ProviderId {
                    provider_id: None,
                    checksum_valid: false,
                }));
        };

        if !is_well_formed(npi) {
            return Ok(RuleResult::fail(
                kind,
                format!("Provider NPI '{}' must be exactly 10 digits", npi),
            )
            .with_denial_code(DenialCode::Co16)
            .with_suggestion("Verify the NPI against the provider registry; it must contain 10 digits and nothing else")
            .with_metadata(RuleMetadata::ProviderId {
                provider_id: Some(npi.to_string()),
                checksum_valid: false,
            }));
        }

        if luhn_valid(&format!("{}{}", ISSUER_PREFIX, npi)) {
            Ok(RuleResult::pass(kind, format!("Provider NPI {} is valid", npi)).with_metadata(
                RuleMetadata::ProviderId {
                    provider_id: Some(npi.to_string()),
                    checksum_valid: true,
                },
            ))
        } else {
            Ok(RuleResult::fail(
                kind,
                format!("Provider NPI {} fails the check digit validation", npi),
            )
            .with_denial_code(DenialCode::Co16)
            .with_suggestion("The NPI appears mistyped; confirm each digit with the provider registry")
            .with_metadata(RuleMetadata::ProviderId {
                provider_id: Some(npi.to_string()),
                checksum_valid: false,
            }))
        }
    }
}

fn is_well_formed(npi: &str) -> bool {
    npi.len() == 10 && npi.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if an NPI passes the prefixed check digit test
pub fn is_valid_npi(npi: &str) -> bool {
    is_well_formed(npi) && luhn_valid(&format!("{}{}", ISSUER_PREFIX, npi))
}

/// Luhn mod-10 test over a digit string
///
/// Walking from the rightmost digit, every second digit (the second from
/// the right, the fourth, ...) is doubled and reduced by 9 when above 9.
/// Non-digit input is never valid.
pub fn luhn_valid(digits: &str) -> bool {
    let mut total = 0u32;
    for (position, ch) in digits.chars().rev().enumerate() {
        let Some(mut digit) = ch.to_digit(10) else {
            return false;
        };
        if position % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        total += digit;
    }
    !digits.is_empty() && total % 10 == 0
}
