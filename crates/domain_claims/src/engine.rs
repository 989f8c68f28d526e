//! Rule registry and evaluation engine
//!
//! The registry is built once at startup, then shared read-only. Every
//! selected rule contributes exactly one result: a rule that returns an
//! error or panics is converted into a FAIL result for its check kind and
//! the rest of the batch still runs.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::{debug, instrument, warn};

use crate::claim::Claim;
use crate::config::EngineConfig;
use crate::context::EvaluationContext;
use crate::error::ClaimError;
use crate::report::ValidationReport;
use crate::result::{CheckKind, RuleResult, RuleStatus};
use crate::rules::{default_rules, ClaimRule};

/// Registered rules in registration order
pub struct RuleRegistry {
    rules: Vec<Arc<dyn ClaimRule>>,
    index: HashMap<String, usize>,
    config: EngineConfig,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.iter().map(|r| r.id()).collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

impl RuleRegistry {
    /// Creates an empty registry
    pub fn new(config: EngineConfig) -> Self {
        Self {
            rules: Vec::new(),
            index: HashMap::new(),
            config,
        }
    }

    /// Creates a registry holding the six standard rules
    pub fn with_default_rules(config: EngineConfig) -> Result<Self, ClaimError> {
        config.validate()?;
        let mut registry = Self::new(config);
        registry.register_many(default_rules())?;
        Ok(registry)
    }

    /// Registers a rule under its id
    ///
    /// A second rule with an id already in use is rejected rather than
    /// replacing or shadowing the first.
    pub fn register(&mut self, rule: Arc<dyn ClaimRule>) -> Result<(), ClaimError> {
        let id = rule.id().to_string();
        if self.index.contains_key(&id) {
            return Err(ClaimError::DuplicateRule(id));
        }
        debug!(rule_id = %id, check = %rule.check_kind(), "Registered rule");
        self.index.insert(id, self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    /// Registers several rules, stopping at the first duplicate
    pub fn register_many(
        &mut self,
        rules: impl IntoIterator<Item = Arc<dyn ClaimRule>>,
    ) -> Result<(), ClaimError> {
        for rule in rules {
            self.register(rule)?;
        }
        Ok(())
    }

    /// Rules reporting under `kind`, in registration order
    pub fn rules_for_check(&self, kind: CheckKind) -> Vec<Arc<dyn ClaimRule>> {
        self.rules
            .iter()
            .filter(|rule| rule.check_kind() == kind)
            .cloned()
            .collect()
    }

    /// Looks up a rule by id
    pub fn get(&self, id: &str) -> Option<&Arc<dyn ClaimRule>> {
        self.index.get(id).map(|&i| &self.rules[i])
    }

    pub fn rules(&self) -> &[Arc<dyn ClaimRule>] {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules to run, in output order
    ///
    /// Without a filter this is registration order. With one, rules are
    /// grouped by the filter's order (repeated kinds count once) and kept in
    /// registration order within a kind.
    fn select(&self, filter: Option<&[CheckKind]>) -> Vec<&Arc<dyn ClaimRule>> {
        match filter {
            None => self.rules.iter().collect(),
            Some(kinds) => {
                let mut seen: Vec<CheckKind> = Vec::with_capacity(kinds.len());
                let mut selected = Vec::new();
                for kind in kinds {
                    if seen.contains(kind) {
                        continue;
                    }
                    seen.push(*kind);
                    selected.extend(self.rules.iter().filter(|r| r.check_kind() == *kind));
                }
                selected
            }
        }
    }

    /// Evaluates the selected rules against one claim
    ///
    /// Runs on the rayon pool when the engine is configured for parallel
    /// evaluation. Output order is the selection order either way.
    #[instrument(skip_all, fields(claim_id = %claim.id, rules = self.rules.len()))]
    pub fn evaluate(
        &self,
        claim: &Claim,
        evaluated_at: DateTime<Utc>,
        filter: Option<&[CheckKind]>,
    ) -> Vec<RuleResult> {
        if self.config.parallel {
            return self.evaluate_parallel(claim, evaluated_at, filter);
        }

        let ctx = EvaluationContext::new(claim, evaluated_at, &self.config);
        self.select(filter)
            .into_iter()
            .map(|rule| run_isolated(rule, &ctx))
            .collect()
    }

    /// Evaluates the selected rules concurrently
    pub fn evaluate_parallel(
        &self,
        claim: &Claim,
        evaluated_at: DateTime<Utc>,
        filter: Option<&[CheckKind]>,
    ) -> Vec<RuleResult> {
        let ctx = EvaluationContext::new(claim, evaluated_at, &self.config);
        self.select(filter)
            .par_iter()
            .map(|rule| run_isolated(rule, &ctx))
            .collect()
    }

    /// Evaluates and packages the results with their score
    pub fn validate(
        &self,
        claim: &Claim,
        evaluated_at: DateTime<Utc>,
        filter: Option<&[CheckKind]>,
    ) -> ValidationReport {
        let results = self.evaluate(claim, evaluated_at, filter);
        ValidationReport::new(claim.id, evaluated_at, results)
    }
}

fn run_isolated(rule: &Arc<dyn ClaimRule>, ctx: &EvaluationContext<'_>) -> RuleResult {
    let outcome = catch_unwind(AssertUnwindSafe(|| rule.evaluate(ctx)));
    let fault = match outcome {
        Ok(Ok(result)) => {
            debug!(rule_id = rule.id(), status = %result.status, "Rule evaluated");
            return result;
        }
        Ok(Err(e)) => e.to_string(),
        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };

    warn!(rule_id = rule.id(), error = %fault, "Rule faulted; reporting FAIL");
    RuleResult::rule_fault(rule.check_kind(), rule.id(), fault)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn weight(status: RuleStatus) -> Decimal {
    match status {
        RuleStatus::Pass => dec!(1.0),
        RuleStatus::Warning => dec!(0.7),
        RuleStatus::Fail => dec!(0.0),
    }
}

/// Aggregate confidence score in `0..=100`
///
/// PASS weighs 1.0, WARNING 0.7 and FAIL 0.0; the score is the mean weight
/// scaled to 100 and rounded half away from zero.
///
/// An empty result set scores 100. Nothing was checked, so nothing was
/// found wrong; callers that need at least one check must enforce that
/// themselves.
pub fn score(results: &[RuleResult]) -> u8 {
    if results.is_empty() {
        return 100;
    }
    let total: Decimal = results.iter().map(|r| weight(r.status)).sum();
    let count = Decimal::from(results.len());
    (dec!(100) * total / count)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results(statuses: &[RuleStatus]) -> Vec<RuleResult> {
        statuses
            .iter()
            .map(|s| match s {
                RuleStatus::Pass => RuleResult::pass(CheckKind::ProviderId, "ok"),
                RuleStatus::Warning => RuleResult::warning(CheckKind::ProviderId, "hmm"),
                RuleStatus::Fail => RuleResult::fail(CheckKind::ProviderId, "no"),
            })
            .collect()
    }

    #[test]
    fn test_score_values() {
        use RuleStatus::*;
        assert_eq!(score(&[]), 100);
        assert_eq!(score(&results(&[Pass, Pass])), 100);
        assert_eq!(score(&results(&[Warning])), 70);
        assert_eq!(score(&results(&[Pass, Warning, Fail])), 57);
        assert_eq!(score(&results(&[Fail, Fail])), 0);
        // 100 * 2.7 / 4 = 67.5
        assert_eq!(score(&results(&[Pass, Pass, Warning, Fail])), 68);
    }

    #[test]
    fn test_default_registry_order() {
        let registry = RuleRegistry::with_default_rules(EngineConfig::default()).unwrap();
        let kinds: Vec<CheckKind> = registry.rules().iter().map(|r| r.check_kind()).collect();
        assert_eq!(kinds, CheckKind::ALL.to_vec());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = RuleRegistry::with_default_rules(EngineConfig::default()).unwrap();
        let err = registry
            .register(Arc::new(crate::rules::ProviderIdRule))
            .unwrap_err();
        assert!(matches!(err, ClaimError::DuplicateRule(id) if id == "provider-id-checksum"));
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_filter_order_and_dedup() {
        let registry = RuleRegistry::with_default_rules(EngineConfig::default()).unwrap();
        let claim = Claim::new();
        let filter = [CheckKind::TimelyFiling, CheckKind::ProviderId, CheckKind::TimelyFiling];
        let out = registry.evaluate(&claim, Utc::now(), Some(&filter));
        let kinds: Vec<CheckKind> = out.iter().map(|r| r.check_kind).collect();
        assert_eq!(kinds, vec![CheckKind::TimelyFiling, CheckKind::ProviderId]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_default_filing_window(0);
        assert!(RuleRegistry::with_default_rules(config).is_err());
    }
}
