//! Claim adjustment reason codes
//!
//! Downstream display and appeal tooling key off the exact code strings,
//! so the serialized form is always the `CO-n` text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClaimError;

/// Payer adjustment reason code (contractual obligation group)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenialCode {
    /// Procedure code inconsistent with the modifier used
    #[serde(rename = "CO-4")]
    Co4,
    /// Diagnosis inconsistent with the procedure
    #[serde(rename = "CO-11")]
    Co11,
    /// Claim lacks information needed for adjudication
    #[serde(rename = "CO-16")]
    Co16,
    /// Time limit for filing has expired
    #[serde(rename = "CO-29")]
    Co29,
    /// Not deemed a medical necessity
    #[serde(rename = "CO-50")]
    Co50,
    /// Benefit included in the allowance for another service
    #[serde(rename = "CO-97")]
    Co97,
}

impl DenialCode {
    pub const ALL: [DenialCode; 6] = [
        DenialCode::Co4,
        DenialCode::Co11,
        DenialCode::Co16,
        DenialCode::Co29,
        DenialCode::Co50,
        DenialCode::Co97,
    ];

    /// Returns the code exactly as payers print it
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialCode::Co4 => "CO-4",
            DenialCode::Co11 => "CO-11",
            DenialCode::Co16 => "CO-16",
            DenialCode::Co29 => "CO-29",
            DenialCode::Co50 => "CO-50",
            DenialCode::Co97 => "CO-97",
        }
    }

    /// Adjustment reason text shown next to the code
    pub fn description(&self) -> &'static str {
        match self {
            DenialCode::Co4 => {
                "The procedure code is inconsistent with the modifier used or a required modifier is missing"
            }
            DenialCode::Co11 => "The diagnosis is inconsistent with the procedure",
            DenialCode::Co16 => {
                "Claim/service lacks information or has submission/billing error(s) which is needed for adjudication"
            }
            DenialCode::Co29 => "The time limit for filing has expired",
            DenialCode::Co50 => {
                "These are non-covered services because this is not deemed a medical necessity by the payer"
            }
            DenialCode::Co97 => {
                "The benefit for this service is included in the payment/allowance for another service/procedure that has already been adjudicated"
            }
        }
    }
}

impl fmt::Display for DenialCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DenialCode {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        DenialCode::ALL
            .into_iter()
            .find(|code| code.as_str() == wanted)
            .ok_or_else(|| ClaimError::UnknownCode {
                kind: "denial code",
                code: s.to_string(),
            })
    }
}
