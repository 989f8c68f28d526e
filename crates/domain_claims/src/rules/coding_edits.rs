//! Bundling, mutually exclusive and unit limit edits
//!
//! The three tables are consulted in order and the first edit hit is
//! returned. Only the bundling table looks at modifiers: a distinct-service
//! modifier on either line of an overridable pair unbundles it.

use std::collections::HashMap;

use crate::context::EvaluationContext;
use crate::denial::DenialCode;
use crate::error::ClaimError;
use crate::reference::{
    bundled_components, mutually_exclusive_pairs, unit_limit, DISTINCT_SERVICE_MODIFIERS,
};
use crate::result::{CheckKind, CodingEdit, RuleMetadata, RuleResult};
use super::ClaimRule;

pub struct CodingEditRule;

impl CodingEditRule {
    fn pair_unbundled(ctx: &EvaluationContext<'_>, comprehensive: &str, component: &str) -> bool {
        ctx.claim()
            .service_lines
            .iter()
            .filter(|line| {
                line.normalized_procedure()
                    .is_some_and(|code| code == comprehensive || code == component)
            })
            .any(|line| line.has_any_modifier(DISTINCT_SERVICE_MODIFIERS))
    }

    fn bundling_edit(
        &self,
        ctx: &EvaluationContext<'_>,
        procedures: &[String],
    ) -> Option<RuleResult> {
        let kind = self.check_kind();
        for comprehensive in procedures {
            for component in bundled_components(comprehensive) {
                if !ctx.has_procedure(component.code) {
                    continue;
                }
                let metadata = RuleMetadata::Bundling {
                    codes_checked: procedures.len(),
                    edit: Some(CodingEdit::ColumnBundle {
                        comprehensive: comprehensive.clone(),
                        component: component.code.to_string(),
                        modifier_allowed: component.modifier_allowed,
                    }),
                };

                if !component.modifier_allowed {
                    return Some(
                        RuleResult::fail(
                            kind,
                            format!(
                                "Procedure {} is bundled into {} and cannot be billed separately",
                                component.code, comprehensive
                            ),
                        )
                        .with_denial_code(DenialCode::Co97)
                        .with_suggestion(format!("Remove {} from the claim", component.code))
                        .with_metadata(metadata),
                    );
                }

                if Self::pair_unbundled(ctx, comprehensive, component.code) {
                    continue;
                }

                return Some(
                    RuleResult::warning(
                        kind,
                        format!(
                            "Procedure {} is normally bundled into {}",
                            component.code, comprehensive
                        ),
                    )
                    .with_denial_code(DenialCode::Co97)
                    .with_suggestion(format!(
                        "If {} was a distinct service, append modifier {} to its line",
                        component.code,
                        DISTINCT_SERVICE_MODIFIERS.join(", ")
                    ))
                    .with_metadata(metadata),
                );
            }
        }
        None
    }

    fn exclusive_edit(
        &self,
        ctx: &EvaluationContext<'_>,
        procedures: &[String],
    ) -> Option<RuleResult> {
        let pair = mutually_exclusive_pairs()
            .iter()
            .find(|pair| ctx.has_procedure(pair.first) && ctx.has_procedure(pair.second))?;

        Some(
            RuleResult::fail(
                self.check_kind(),
                format!(
                    "Procedures {} and {} cannot be billed on the same claim: {}",
                    pair.first, pair.second, pair.reason
                ),
            )
            .with_denial_code(DenialCode::Co97)
            .with_suggestion(format!(
                "Bill only the procedure that was performed, {} or {}",
                pair.first, pair.second
            ))
            .with_metadata(RuleMetadata::Bundling {
                codes_checked: procedures.len(),
                edit: Some(CodingEdit::MutuallyExclusive {
                    first: pair.first.to_string(),
                    second: pair.second.to_string(),
                }),
            }),
        )
    }

    fn unit_edit(&self, ctx: &EvaluationContext<'_>, procedures: &[String]) -> Option<RuleResult> {
        let mut billed: HashMap<String, u32> = HashMap::new();
        for line in &ctx.claim().service_lines {
            if let Some(code) = line.normalized_procedure() {
                let total = billed.entry(code).or_insert(0);
                *total = total.saturating_add(line.units);
            }
        }

        procedures.iter().find_map(|code| {
            let max_units = unit_limit(code)?;
            let billed_units = billed.get(code).copied().unwrap_or(0);
            if billed_units <= max_units {
                return None;
            }
            Some(
                RuleResult::warning(
                    self.check_kind(),
                    format!(
                        "Procedure {} billed for {} units, above the limit of {}",
                        code, billed_units, max_units
                    ),
                )
                .with_denial_code(DenialCode::Co97)
                .with_suggestion(
                    "Reduce the billed units or document medical necessity to support an appeal",
                )
                .with_metadata(RuleMetadata::Bundling {
                    codes_checked: procedures.len(),
                    edit: Some(CodingEdit::UnitLimit {
                        procedure_code: code.clone(),
                        billed_units,
                        max_units,
                    }),
                }),
            )
        })
    }
}

impl ClaimRule for CodingEditRule {
    fn id(&self) -> &str {
        "coding-edits"
    }

    fn name(&self) -> &str {
        "Bundling and Unit Edits"
    }

    fn check_kind(&self) -> CheckKind {
        CheckKind::Bundling
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<RuleResult, ClaimError> {
        let procedures = ctx.procedure_codes();

        let hit = self
            .bundling_edit(ctx, &procedures)
            .or_else(|| self.exclusive_edit(ctx, &procedures))
            .or_else(|| self.unit_edit(ctx, &procedures));

        Ok(hit.unwrap_or_else(|| {
            RuleResult::pass(
                self.check_kind(),
                format!(
                    "No coding edits triggered; {} distinct procedure code(s) checked",
                    procedures.len()
                ),
            )
            .with_metadata(RuleMetadata::Bundling {
                codes_checked: procedures.len(),
                edit: None,
            })
        }))
    }
}
