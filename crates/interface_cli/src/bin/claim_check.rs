//! claim-check - Validate a claim for denial risk
//!
//! # Usage
//!
//! ```bash
//! # Run every check and print a text report
//! claim-check claim.json
//!
//! # Run selected checks at a fixed evaluation time, JSON output
//! claim-check claim.json --check ncci_edits --check timely_filing \
//!     --at 2024-06-15T12:00:00Z --format json
//!
//! # Count filing days on a US Eastern calendar
//! claim-check claim.json --timezone America/New_York
//!
//! # Read the claim from stdin
//! cat claim.json | claim-check -
//! ```
//!
//! # Environment Variables
//!
//! * `CLAIMS_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: warn)
//! * `CLAIMS_JSON_LOGS` - Emit JSON log lines on stderr (default: false)
//! * `CLAIMS_ENGINE__NEAR_DEADLINE_THRESHOLD_DAYS` - Timely-filing warning threshold (default: 30)
//! * `CLAIMS_ENGINE__DEFAULT_FILING_WINDOW_DAYS` - Window for unlisted payers (default: 90)
//! * `CLAIMS_ENGINE__FILING_TIMEZONE` - IANA timezone for day counting (default: UTC)
//! * `CLAIMS_ENGINE__WARNING_LABEL` - Spelling of the warning status (default: WARNING)
//! * `CLAIMS_ENGINE__PARALLEL` - Evaluate rules on a thread pool (default: false)

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;

use domain_claims::{CheckKind, RuleRegistry};
use interface_cli::config::CliConfig;
use interface_cli::load_claim;
use interface_cli::render::{render_json, render_text, OutputFormat};
use interface_cli::telemetry::init_tracing;

#[derive(Parser)]
#[command(name = "claim-check")]
#[command(about = "Check a claim for likely denial reasons")]
#[command(version)]
struct Cli {
    /// Claim JSON file, or `-` for stdin
    claim: PathBuf,

    /// Run only this check (repeatable); output follows the order given
    #[arg(short, long = "check", value_name = "CHECK")]
    checks: Vec<CheckKind>,

    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// IANA timezone used to count filing days (overrides configuration)
    #[arg(long, value_name = "TZ")]
    timezone: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Evaluate rules in parallel
    #[arg(long)]
    parallel: bool,

    /// Exit with status 2 when any check fails
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = CliConfig::from_env().context("Failed to load CLAIMS_* configuration")?;
    if cli.parallel {
        config.engine.parallel = true;
    }
    if let Some(tz) = &cli.timezone {
        config.engine = config.engine.with_filing_timezone_name(tz)?;
    }

    init_tracing(&config.log_level, config.json_logs);

    let warning_label = config.engine.warning_label.clone();
    let registry = RuleRegistry::with_default_rules(config.engine)
        .context("Failed to build rule registry")?;

    let claim = load_claim(&cli.claim)?;
    let evaluated_at = cli.at.unwrap_or_else(Utc::now);
    let filter = (!cli.checks.is_empty()).then_some(cli.checks.as_slice());

    tracing::info!(
        claim_id = %claim.id,
        rules = registry.len(),
        %evaluated_at,
        "Validating claim"
    );

    let report = registry.validate(&claim, evaluated_at, filter);

    let output = match cli.format {
        OutputFormat::Text => render_text(&report, &warning_label),
        OutputFormat::Json => render_json(&report).context("Failed to serialize report")?,
    };
    println!("{}", output.trim_end());

    tracing::info!(score = report.score, "Validation complete");

    if cli.strict && report.has_blocking_failure() {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
