//! Registry, fault isolation and scoring tests for domain_claims

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal_macros::dec;

use domain_claims::{
    score, CheckKind, Claim, ClaimError, ClaimRule, EngineConfig, EvaluationContext,
    RuleMetadata, RuleRegistry, RuleResult, RuleStatus, ServiceLine,
};

fn evaluated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

fn sample_claim() -> Claim {
    let mut claim = Claim::new();
    claim.provider.npi = Some("1234567893".to_string());
    claim.add_line(ServiceLine::new("96413", dec!(600)).with_diagnosis("C50.911"));
    claim
}

// ============================================================================
// Test rules
// ============================================================================

struct ErroringRule;

impl ClaimRule for ErroringRule {
    fn id(&self) -> &str {
        "erroring"
    }

    fn name(&self) -> &str {
        "Always errors"
    }

    fn check_kind(&self) -> CheckKind {
        CheckKind::ModifierCompatibility
    }

    fn evaluate(&self, _ctx: &EvaluationContext<'_>) -> Result<RuleResult, ClaimError> {
        Err(ClaimError::rule_execution(self.id(), "lookup table missing"))
    }
}

struct PanickingRule;

impl ClaimRule for PanickingRule {
    fn id(&self) -> &str {
        "panicking"
    }

    fn name(&self) -> &str {
        "Always panics"
    }

    fn check_kind(&self) -> CheckKind {
        CheckKind::Bundling
    }

    fn evaluate(&self, _ctx: &EvaluationContext<'_>) -> Result<RuleResult, ClaimError> {
        panic!("bundling table corrupted")
    }
}

struct StaticRule {
    id: &'static str,
    kind: CheckKind,
    status: RuleStatus,
}

impl ClaimRule for StaticRule {
    fn id(&self) -> &str {
        self.id
    }

    fn name(&self) -> &str {
        self.id
    }

    fn check_kind(&self) -> CheckKind {
        self.kind
    }

    fn evaluate(&self, _ctx: &EvaluationContext<'_>) -> Result<RuleResult, ClaimError> {
        let result = match self.status {
            RuleStatus::Pass => RuleResult::pass(self.kind, self.id),
            RuleStatus::Warning => RuleResult::warning(self.kind, self.id),
            RuleStatus::Fail => RuleResult::fail(self.kind, self.id),
        };
        Ok(result)
    }
}

// ============================================================================
// Fault isolation
// ============================================================================

mod fault_isolation_tests {
    use super::*;

    fn registry_with_faults() -> RuleRegistry {
        let mut registry = RuleRegistry::new(EngineConfig::default());
        registry
            .register_many(vec![
                Arc::new(domain_claims::rules::ProviderIdRule) as Arc<dyn ClaimRule>,
                Arc::new(ErroringRule),
                Arc::new(PanickingRule),
                Arc::new(domain_claims::rules::ProcedureDiagnosisRule),
            ])
            .unwrap();
        registry
    }

    #[test]
    fn test_erroring_rule_yields_single_fail() {
        let registry = registry_with_faults();
        let results = registry.evaluate(&sample_claim(), evaluated_at(), None);

        assert_eq!(results.len(), 4);
        let faulted = &results[1];
        assert_eq!(faulted.check_kind, CheckKind::ModifierCompatibility);
        assert_eq!(faulted.status, RuleStatus::Fail);
        assert!(faulted.message.contains("erroring"));
        assert!(faulted.message.contains("lookup table missing"));
        assert!(matches!(
            &faulted.metadata,
            Some(RuleMetadata::RuleFault { rule_id, .. }) if rule_id == "erroring"
        ));
    }

    #[test]
    fn test_panicking_rule_yields_single_fail() {
        let registry = registry_with_faults();
        let results = registry.evaluate(&sample_claim(), evaluated_at(), None);

        let faulted = &results[2];
        assert_eq!(faulted.check_kind, CheckKind::Bundling);
        assert_eq!(faulted.status, RuleStatus::Fail);
        assert!(faulted.message.contains("panicking"));
        assert!(faulted.message.contains("bundling table corrupted"));
    }

    #[test]
    fn test_other_rules_unaffected() {
        let registry = registry_with_faults();
        let results = registry.evaluate(&sample_claim(), evaluated_at(), None);

        assert_eq!(results[0].check_kind, CheckKind::ProviderId);
        assert_eq!(results[0].status, RuleStatus::Pass);
        assert_eq!(results[3].check_kind, CheckKind::ProcedureDiagnosis);
        assert_eq!(results[3].status, RuleStatus::Pass);
    }

    #[test]
    fn test_parallel_isolates_faults_and_keeps_order() {
        let registry = registry_with_faults();
        let sequential = registry.evaluate(&sample_claim(), evaluated_at(), None);
        let parallel = registry.evaluate_parallel(&sample_claim(), evaluated_at(), None);

        let kinds = |rs: &[RuleResult]| rs.iter().map(|r| (r.check_kind, r.status)).collect::<Vec<_>>();
        assert_eq!(kinds(&sequential[..]), kinds(&parallel[..]));
    }
}

// ============================================================================
// Registry
// ============================================================================

mod registry_tests {
    use super::*;

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut registry = RuleRegistry::default();
        registry
            .register(Arc::new(StaticRule {
                id: "same",
                kind: CheckKind::ProviderId,
                status: RuleStatus::Pass,
            }))
            .unwrap();

        let err = registry
            .register(Arc::new(StaticRule {
                id: "same",
                kind: CheckKind::TimelyFiling,
                status: RuleStatus::Fail,
            }))
            .unwrap_err();

        assert!(matches!(err, ClaimError::DuplicateRule(_)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("same").unwrap().check_kind(), CheckKind::ProviderId);
    }

    #[test]
    fn test_rules_for_check_keeps_registration_order() {
        let mut registry = RuleRegistry::default();
        for id in ["b", "a", "c"] {
            registry
                .register(Arc::new(StaticRule {
                    id,
                    kind: CheckKind::Bundling,
                    status: RuleStatus::Pass,
                }))
                .unwrap();
        }
        registry
            .register(Arc::new(StaticRule {
                id: "other",
                kind: CheckKind::TimelyFiling,
                status: RuleStatus::Pass,
            }))
            .unwrap();

        let ids: Vec<String> = registry
            .rules_for_check(CheckKind::Bundling)
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert!(registry.rules_for_check(CheckKind::DataCompleteness).is_empty());
    }

    #[test]
    fn test_filter_selects_in_filter_order() {
        let registry = RuleRegistry::with_default_rules(EngineConfig::default()).unwrap();
        let filter = [CheckKind::Bundling, CheckKind::ProviderId];
        let results = registry.evaluate(&sample_claim(), evaluated_at(), Some(&filter));

        let kinds: Vec<CheckKind> = results.iter().map(|r| r.check_kind).collect();
        assert_eq!(kinds, filter.to_vec());
    }

    #[test]
    fn test_empty_filter_runs_nothing() {
        let registry = RuleRegistry::with_default_rules(EngineConfig::default()).unwrap();
        let report = registry.validate(&sample_claim(), evaluated_at(), Some(&[]));

        assert!(report.results.is_empty());
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_full_run_emits_one_result_per_rule() {
        let registry = RuleRegistry::with_default_rules(EngineConfig::default()).unwrap();
        let results = registry.evaluate(&Claim::new(), evaluated_at(), None);

        assert_eq!(results.len(), registry.len());
        let kinds: Vec<CheckKind> = results.iter().map(|r| r.check_kind).collect();
        assert_eq!(kinds, CheckKind::ALL.to_vec());
    }

    #[test]
    fn test_parallel_config_matches_sequential() {
        let sequential = RuleRegistry::with_default_rules(EngineConfig::default()).unwrap();
        let parallel = RuleRegistry::with_default_rules(EngineConfig {
            parallel: true,
            ..EngineConfig::default()
        })
        .unwrap();

        let claim = sample_claim();
        assert_eq!(
            sequential.evaluate(&claim, evaluated_at(), None),
            parallel.evaluate(&claim, evaluated_at(), None)
        );
    }
}

// ============================================================================
// Score
// ============================================================================

fn status_strategy() -> impl Strategy<Value = RuleStatus> {
    prop_oneof![
        Just(RuleStatus::Pass),
        Just(RuleStatus::Warning),
        Just(RuleStatus::Fail),
    ]
}

fn to_results(statuses: &[RuleStatus]) -> Vec<RuleResult> {
    statuses
        .iter()
        .map(|status| match status {
            RuleStatus::Pass => RuleResult::pass(CheckKind::ProviderId, "pass"),
            RuleStatus::Warning => RuleResult::warning(CheckKind::ProviderId, "warning"),
            RuleStatus::Fail => RuleResult::fail(CheckKind::ProviderId, "fail"),
        })
        .collect()
}

fn degrade(status: RuleStatus) -> RuleStatus {
    match status {
        RuleStatus::Pass => RuleStatus::Warning,
        RuleStatus::Warning | RuleStatus::Fail => RuleStatus::Fail,
    }
}

#[test]
fn test_empty_result_set_scores_100() {
    assert_eq!(score(&[]), 100);
}

proptest! {
    #[test]
    fn score_is_in_range(statuses in prop::collection::vec(status_strategy(), 0..40)) {
        let s = score(&to_results(&statuses));
        prop_assert!(s <= 100);
    }

    #[test]
    fn degrading_one_status_never_raises_score(
        statuses in prop::collection::vec(status_strategy(), 1..40),
        pick in any::<prop::sample::Index>()
    ) {
        let before = score(&to_results(&statuses));
        let mut worse = statuses.clone();
        let i = pick.index(worse.len());
        worse[i] = degrade(worse[i]);
        let after = score(&to_results(&worse));
        prop_assert!(after <= before);
    }

    #[test]
    fn all_pass_scores_100_and_all_fail_scores_0(n in 1usize..30) {
        prop_assert_eq!(score(&to_results(&vec![RuleStatus::Pass; n])), 100);
        prop_assert_eq!(score(&to_results(&vec![RuleStatus::Fail; n])), 0);
    }
}
