//! Claim validation rules
//!
//! Each rule is a pure function of an [`EvaluationContext`]: it reads the
//! claim and the static reference tables, never other rules' results, and
//! produces exactly one [`RuleResult`].

pub mod provider_id;
pub mod completeness;
pub mod procedure_diagnosis;
pub mod modifiers;
pub mod coding_edits;
pub mod timely_filing;

use std::sync::Arc;

use crate::context::EvaluationContext;
use crate::error::ClaimError;
use crate::result::{CheckKind, RuleResult};

pub use provider_id::ProviderIdRule;
pub use completeness::DataCompletenessRule;
pub use procedure_diagnosis::ProcedureDiagnosisRule;
pub use modifiers::ModifierRule;
pub use coding_edits::CodingEditRule;
pub use timely_filing::TimelyFilingRule;

/// A pluggable claim check
///
/// Implementations must be side-effect free. Returning `Err` (or panicking)
/// is treated by the engine as a rule fault and converted into a FAIL result
/// for the rule's check kind.
pub trait ClaimRule: Send + Sync {
    /// Unique registry key
    fn id(&self) -> &str;

    /// Human readable name
    fn name(&self) -> &str;

    /// The check this rule reports under
    fn check_kind(&self) -> CheckKind;

    /// Evaluates the rule against one claim
    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<RuleResult, ClaimError>;
}

/// The six standard rules in display order
pub fn default_rules() -> Vec<Arc<dyn ClaimRule>> {
    vec![
        Arc::new(ProviderIdRule),
        Arc::new(DataCompletenessRule),
        Arc::new(ProcedureDiagnosisRule),
        Arc::new(ModifierRule),
        Arc::new(CodingEditRule),
        Arc::new(TimelyFilingRule),
    ]
}
