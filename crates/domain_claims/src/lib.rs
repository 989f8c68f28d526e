//! Claim Validation Domain
//!
//! This crate answers one question about a populated claim: is it likely to
//! be denied, and why? A [`RuleRegistry`] runs a set of independent rules
//! over the claim and returns one [`RuleResult`] per rule, in a stable
//! order, along with an aggregate score.
//!
//! # Rules
//!
//! ```text
//! npi_validation         provider identifier checksum        CO-16
//! data_completeness      required fields                     CO-16
//! cpt_icd_compatibility  procedure/diagnosis support         CO-50, CO-11
//! modifier_validation    modifier conflicts and usage        CO-4
//! ncci_edits             bundling, exclusive pairs, units    CO-97
//! timely_filing          payer filing window                 CO-29
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let registry = RuleRegistry::with_default_rules(EngineConfig::default())?;
//! let report = registry.validate(&claim, Utc::now(), None);
//! if report.has_blocking_failure() {
//!     // caller decides whether to hold the claim
//! }
//! ```

pub mod claim;
pub mod config;
pub mod context;
pub mod denial;
pub mod engine;
pub mod error;
pub mod reference;
pub mod report;
pub mod result;
pub mod rules;

pub use claim::{Claim, Gender, Insurance, Patient, Provider, ServiceLine};
pub use config::EngineConfig;
pub use context::EvaluationContext;
pub use denial::DenialCode;
pub use engine::{score, RuleRegistry};
pub use error::ClaimError;
pub use report::{StatusCounts, ValidationReport};
pub use result::{CheckKind, CodingEdit, RuleMetadata, RuleResult, RuleStatus};
pub use rules::ClaimRule;
