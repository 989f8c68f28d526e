//! Command Line Interface
//!
//! Loads a claim from JSON, runs it through the rule registry and renders
//! the report. The `claim-check` binary is a thin wrapper over this crate.
//!
//! # Example
//!
//! ```bash
//! claim-check claim.json --check npi_validation --check timely_filing
//! CLAIMS_ENGINE__WARNING_LABEL=WARN claim-check claim.json --format json
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod telemetry;

use std::io::Read;
use std::path::Path;

use tracing::debug;

use domain_claims::Claim;

use crate::error::CliError;

/// Reads a claim from a JSON file; `-` reads standard input
pub fn load_claim(path: &Path) -> Result<Claim, CliError> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?
    };

    let claim: Claim = serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(claim_id = %claim.id, lines = claim.service_lines.len(), "Loaded claim");
    Ok(claim)
}
