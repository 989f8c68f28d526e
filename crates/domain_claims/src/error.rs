//! Claims domain errors

use thiserror::Error;

use core_kernel::CoreError;

/// Errors that can occur in the claims validation domain
///
/// None of these represent a finding about the claim itself; findings are
/// reported as rule results. These cover registry misuse, rule faults and
/// bad configuration.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Rule already registered: {0}")]
    DuplicateRule(String),

    #[error("Rule {rule_id} failed: {message}")]
    RuleExecution { rule_id: String, message: String },

    #[error("Unknown {kind}: {code}")]
    UnknownCode { kind: &'static str, code: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClaimError {
    pub fn rule_execution(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        ClaimError::RuleExecution {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }
}
