//! Rule outcomes
//!
//! Every rule invocation produces exactly one [`RuleResult`]. The result
//! carries a closed [`RuleMetadata`] payload, one variant per check kind, so
//! consumers can match exhaustively instead of probing an untyped map.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{ALT_WARNING_LABEL, WARNING_LABEL};
use crate::denial::DenialCode;
use crate::error::ClaimError;

/// The fixed set of checks; each rule is tagged with exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckKind {
    #[serde(rename = "npi_validation")]
    ProviderId,
    #[serde(rename = "data_completeness")]
    DataCompleteness,
    #[serde(rename = "cpt_icd_compatibility")]
    ProcedureDiagnosis,
    #[serde(rename = "modifier_validation")]
    ModifierCompatibility,
    #[serde(rename = "ncci_edits")]
    Bundling,
    #[serde(rename = "timely_filing")]
    TimelyFiling,
}

impl CheckKind {
    pub const ALL: [CheckKind; 6] = [
        CheckKind::ProviderId,
        CheckKind::DataCompleteness,
        CheckKind::ProcedureDiagnosis,
        CheckKind::ModifierCompatibility,
        CheckKind::Bundling,
        CheckKind::TimelyFiling,
    ];

    /// Stable identifier used in serialized results and CLI filters
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::ProviderId => "npi_validation",
            CheckKind::DataCompleteness => "data_completeness",
            CheckKind::ProcedureDiagnosis => "cpt_icd_compatibility",
            CheckKind::ModifierCompatibility => "modifier_validation",
            CheckKind::Bundling => "ncci_edits",
            CheckKind::TimelyFiling => "timely_filing",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CheckKind {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CheckKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ClaimError::UnknownCode {
                kind: "check kind",
                code: s.to_string(),
            })
    }
}

/// Outcome severity of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "WARNING", alias = "WARN")]
    Warning,
    #[serde(rename = "FAIL")]
    Fail,
}

impl RuleStatus {
    /// Canonical label
    pub fn label(&self) -> &'static str {
        match self {
            RuleStatus::Pass => "PASS",
            RuleStatus::Warning => WARNING_LABEL,
            RuleStatus::Fail => "FAIL",
        }
    }

    /// Label with a caller-chosen spelling for warnings
    pub fn label_with<'a>(&self, warning_label: &'a str) -> &'a str {
        match self {
            RuleStatus::Pass => "PASS",
            RuleStatus::Warning => warning_label,
            RuleStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for RuleStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PASS" => Ok(RuleStatus::Pass),
            WARNING_LABEL | ALT_WARNING_LABEL => Ok(RuleStatus::Warning),
            "FAIL" => Ok(RuleStatus::Fail),
            _ => Err(ClaimError::UnknownCode {
                kind: "rule status",
                code: s.to_string(),
            }),
        }
    }
}

/// The specific coding edit a bundling check tripped on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "edit", rename_all = "snake_case")]
pub enum CodingEdit {
    ColumnBundle {
        comprehensive: String,
        component: String,
        modifier_allowed: bool,
    },
    MutuallyExclusive {
        first: String,
        second: String,
    },
    UnitLimit {
        procedure_code: String,
        billed_units: u32,
        max_units: u32,
    },
}

/// Check-specific details attached to a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum RuleMetadata {
    ProviderId {
        provider_id: Option<String>,
        checksum_valid: bool,
    },
    DataCompleteness {
        missing_critical: Vec<String>,
        missing_other: Vec<String>,
    },
    ProcedureDiagnosis {
        checked_codes: Vec<String>,
        unsupported_code: Option<String>,
    },
    ModifierCompatibility {
        modifiers_validated: usize,
        errors: Vec<String>,
        warnings: Vec<String>,
    },
    Bundling {
        codes_checked: usize,
        edit: Option<CodingEdit>,
    },
    TimelyFiling {
        payer_id: Option<String>,
        filing_window_days: i64,
        days_elapsed: i64,
        days_remaining: i64,
    },
    /// The rule itself faulted; the result was synthesized by the engine
    RuleFault {
        rule_id: String,
        error: String,
    },
}

/// Outcome of one rule invocation against one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub check_kind: CheckKind,
    pub status: RuleStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denial_code: Option<DenialCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RuleMetadata>,
}

impl RuleResult {
    fn new(check_kind: CheckKind, status: RuleStatus, message: impl Into<String>) -> Self {
        Self {
            check_kind,
            status,
            message: message.into(),
            suggestion: None,
            denial_code: None,
            metadata: None,
        }
    }

    pub fn pass(check_kind: CheckKind, message: impl Into<String>) -> Self {
        Self::new(check_kind, RuleStatus::Pass, message)
    }

    pub fn warning(check_kind: CheckKind, message: impl Into<String>) -> Self {
        Self::new(check_kind, RuleStatus::Warning, message)
    }

    pub fn fail(check_kind: CheckKind, message: impl Into<String>) -> Self {
        Self::new(check_kind, RuleStatus::Fail, message)
    }

    /// FAIL result standing in for a rule that errored or panicked
    pub fn rule_fault(check_kind: CheckKind, rule_id: &str, error: impl Into<String>) -> Self {
        let error = error.into();
        Self::fail(check_kind, format!("Rule '{}' failed to evaluate: {}", rule_id, error))
            .with_suggestion("Re-run validation; report the error if it persists")
            .with_metadata(RuleMetadata::RuleFault {
                rule_id: rule_id.to_string(),
                error,
            })
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_denial_code(mut self, code: DenialCode) -> Self {
        self.denial_code = Some(code);
        self
    }

    pub fn with_metadata(mut self, metadata: RuleMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_pass(&self) -> bool {
        self.status == RuleStatus::Pass
    }

    pub fn is_fail(&self) -> bool {
        self.status == RuleStatus::Fail
    }
}
