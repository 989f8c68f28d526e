//! Report rendering

use domain_claims::{RuleResult, ValidationReport};

/// Output format for a validation report
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human readable lines
    Text,
    /// The report as pretty-printed JSON
    Json,
}

/// Serializes the report as pretty JSON
pub fn render_json(report: &ValidationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Renders the report as plain text
///
/// `warning_label` controls how WARNING statuses are spelled.
pub fn render_text(report: &ValidationReport, warning_label: &str) -> String {
    let mut out = format!(
        "Claim {} evaluated at {}\n",
        report.claim_id,
        report.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    for result in &report.results {
        out.push_str(&render_result(result, warning_label));
    }

    let counts = report.counts();
    out.push_str(&format!(
        "Score: {}/100 (pass {}, {} {}, fail {})\n",
        report.score,
        counts.pass,
        warning_label.to_lowercase(),
        counts.warning,
        counts.fail
    ));
    out
}

fn render_result(result: &RuleResult, warning_label: &str) -> String {
    let status = format!("[{}]", result.status.label_with(warning_label));
    let code = result
        .denial_code
        .map(|c| c.to_string())
        .unwrap_or_default();

    let mut line = format!(
        "  {:<10} {:<22} {:<6} {}\n",
        status, result.check_kind, code, result.message
    );
    if let Some(suggestion) = &result.suggestion {
        line.push_str(&format!("  {:<10} {:<22} {:<6} -> {}\n", "", "", "", suggestion));
    }
    line
}
