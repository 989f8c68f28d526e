//! Modifier compatibility
//!
//! Errors (conflicting or inapplicable modifiers) fail the check. Missing
//! required modifiers and modifiers that need chart support only warn.

use crate::claim::ServiceLine;
use crate::context::EvaluationContext;
use crate::denial::DenialCode;
use crate::error::ClaimError;
use crate::reference::{modifier_definition, required_modifiers};
use crate::result::{CheckKind, RuleMetadata, RuleResult};
use super::ClaimRule;

pub struct ModifierRule;

#[derive(Debug, Default)]
struct LineFindings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn check_line(number: usize, line: &ServiceLine, findings: &mut LineFindings) {
    let procedure = line.normalized_procedure();
    let procedure_label = procedure.as_deref().unwrap_or("(none)");
    let modifiers = line.normalized_modifiers();

    let mut conflicts: Vec<(&str, &str)> = Vec::new();
    for modifier in &modifiers {
        let Some(definition) = modifier_definition(modifier) else {
            continue;
        };
        for other in &modifiers {
            if other == modifier {
                continue;
            }
            let clash = definition.conflicts_with(other)
                || modifier_definition(other).map_or(false, |o| o.conflicts_with(modifier));
            let already = conflicts
                .iter()
                .any(|(a, b)| *a == other.as_str() && *b == modifier.as_str());
            if clash && !already {
                conflicts.push((modifier.as_str(), other.as_str()));
                findings.errors.push(format!(
                    "Line {}: modifier {} ({}) cannot be reported with modifier {} on procedure {}",
                    number, modifier, definition.name, other, procedure_label
                ));
            }
        }
    }

    // A blank procedure matches no restriction list
    for modifier in &modifiers {
        let Some(definition) = modifier_definition(modifier) else {
            continue;
        };
        if !definition.applies_to_procedure(procedure.as_deref().unwrap_or("")) {
            findings.errors.push(format!(
                "Line {}: modifier {} ({}) is not valid with procedure {}",
                number, modifier, definition.name, procedure_label
            ));
        }
    }

    if let Some(procedure) = procedure.as_deref() {
        if let Some(required) = required_modifiers(procedure) {
            if !line.has_any_modifier(required) {
                findings.warnings.push(format!(
                    "Line {}: procedure {} requires one of modifiers {}",
                    number,
                    procedure,
                    required.join(", ")
                ));
            }
        }
    }

    for modifier in &modifiers {
        if let Some(definition) = modifier_definition(modifier) {
            if definition.requires_documentation {
                findings.warnings.push(format!(
                    "Line {}: modifier {} ({}) must be supported by documentation in the medical record",
                    number, modifier, definition.name
                ));
            }
        }
    }
}

impl ClaimRule for ModifierRule {
    fn id(&self) -> &str {
        "modifier-compatibility"
    }

    fn name(&self) -> &str {
        "Modifier Compatibility"
    }

    fn check_kind(&self) -> CheckKind {
        CheckKind::ModifierCompatibility
    }

    fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<RuleResult, ClaimError> {
        let kind = self.check_kind();
        let mut findings = LineFindings::default();
        let mut modifiers_validated = 0;

        for (index, line) in ctx.claim().service_lines.iter().enumerate() {
            modifiers_validated += line.normalized_modifiers().len();
            check_line(index + 1, line, &mut findings);
        }

        let first_error = findings.errors.first().cloned();
        let first_warning = findings.warnings.first().cloned();
        let metadata = RuleMetadata::ModifierCompatibility {
            modifiers_validated,
            errors: findings.errors,
            warnings: findings.warnings,
        };

        if let Some(error) = first_error {
            return Ok(RuleResult::fail(kind, error)
                .with_denial_code(DenialCode::Co4)
                .with_suggestion("Correct or remove the conflicting modifier before submission")
                .with_metadata(metadata));
        }

        if let Some(warning) = first_warning {
            return Ok(RuleResult::warning(kind, warning)
                .with_suggestion("Review the modifier policy notes and attach documentation where needed")
                .with_metadata(metadata));
        }

        Ok(RuleResult::pass(
            kind,
            format!("{} modifier(s) validated", modifiers_validated),
        )
        .with_metadata(metadata))
    }
}
