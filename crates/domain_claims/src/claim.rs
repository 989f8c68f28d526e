//! Claim aggregate
//!
//! A claim is assembled by an upstream producer (data-entry flow, batch
//! importer, API caller) and handed to the rule engine read-only. Fields a
//! producer may not have collected yet are `Option`s so that the completeness
//! rule can report them instead of the claim failing to deserialize.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;

/// Administrative gender as reported on the claim form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[serde(alias = "m", alias = "M")]
    Male,
    #[serde(alias = "f", alias = "F")]
    Female,
    Other,
    Unknown,
}

/// Patient demographics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    /// Full name as it appears on the insurance card
    pub name: Option<String>,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Administrative gender
    pub gender: Option<Gender>,
}

/// Coverage the claim is billed against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insurance {
    /// Subscriber/member identifier
    pub member_id: Option<String>,
    /// Payer identifier used for payer-specific policies
    pub payer_id: Option<String>,
    /// Payer display name
    pub payer_name: Option<String>,
}

/// Billing provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    /// 10-digit provider identifier (NPI)
    pub npi: Option<String>,
    /// Provider or organization name
    pub name: Option<String>,
}

/// A billed procedure line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLine {
    /// Procedure code (CPT/HCPCS)
    #[serde(default)]
    pub procedure_code: String,
    /// Modifier codes in the order they were entered
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Diagnosis codes (ICD-10) in pointer order
    #[serde(default)]
    pub diagnosis_codes: Vec<String>,
    /// National drug code for drug lines
    #[serde(default)]
    pub drug_code: Option<String>,
    /// Drug quantity in the drug code's unit of measure
    #[serde(default)]
    pub drug_units: Option<Decimal>,
    /// Billed units of service
    #[serde(default = "default_units")]
    pub units: u32,
    /// Billed charge for the line
    #[serde(default)]
    pub charge_amount: Decimal,
}

fn default_units() -> u32 {
    1
}

impl ServiceLine {
    /// Creates a single-unit line for a procedure
    pub fn new(procedure_code: impl Into<String>, charge_amount: Decimal) -> Self {
        Self {
            procedure_code: procedure_code.into(),
            modifiers: Vec::new(),
            diagnosis_codes: Vec::new(),
            drug_code: None,
            drug_units: None,
            units: 1,
            charge_amount,
        }
    }

    /// Adds a diagnosis code
    pub fn with_diagnosis(mut self, code: impl Into<String>) -> Self {
        self.diagnosis_codes.push(code.into());
        self
    }

    /// Adds a modifier code
    pub fn with_modifier(mut self, code: impl Into<String>) -> Self {
        self.modifiers.push(code.into());
        self
    }

    /// Sets billed units
    pub fn with_units(mut self, units: u32) -> Self {
        self.units = units;
        self
    }

    /// Sets the drug code and quantity
    pub fn with_drug(mut self, code: impl Into<String>, units: Decimal) -> Self {
        self.drug_code = Some(code.into());
        self.drug_units = Some(units);
        self
    }

    /// Procedure code normalized for table lookups
    pub fn normalized_procedure(&self) -> Option<String> {
        normalize_code(&self.procedure_code)
    }

    /// Modifier codes normalized for table lookups, blanks dropped
    pub fn normalized_modifiers(&self) -> Vec<String> {
        self.modifiers.iter().filter_map(|m| normalize_code(m)).collect()
    }

    /// Returns true if any modifier on the line matches one of `codes`
    pub fn has_any_modifier(&self, codes: &[&str]) -> bool {
        self.normalized_modifiers()
            .iter()
            .any(|m| codes.contains(&m.as_str()))
    }
}

/// A professional claim submitted for validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    #[serde(default)]
    pub id: ClaimId,
    /// Patient demographics
    #[serde(default)]
    pub patient: Patient,
    /// Coverage information
    #[serde(default)]
    pub insurance: Insurance,
    /// Billing provider
    #[serde(default)]
    pub provider: Provider,
    /// Date the services were rendered
    #[serde(default)]
    pub date_of_service: Option<NaiveDate>,
    /// Place of service code (e.g. "11" office, "22" outpatient hospital)
    #[serde(default)]
    pub place_of_service: Option<String>,
    /// Billed lines
    #[serde(default)]
    pub service_lines: Vec<ServiceLine>,
    /// Existing prior authorization number, if one was obtained
    #[serde(default)]
    pub prior_authorization: Option<String>,
}

impl Claim {
    /// Creates an empty claim with a fresh identifier
    pub fn new() -> Self {
        Self {
            id: ClaimId::new_v7(),
            patient: Patient::default(),
            insurance: Insurance::default(),
            provider: Provider::default(),
            date_of_service: None,
            place_of_service: None,
            service_lines: Vec::new(),
            prior_authorization: None,
        }
    }

    /// Adds a service line
    pub fn add_line(&mut self, line: ServiceLine) {
        self.service_lines.push(line);
    }

    /// Sum of all line charges
    pub fn total_charge(&self) -> Decimal {
        self.service_lines.iter().map(|l| l.charge_amount).sum()
    }
}

impl Default for Claim {
    fn default() -> Self {
        Self::new()
    }
}

/// Trims and upper-cases a code; blank input yields `None`
pub fn normalize_code(code: &str) -> Option<String> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_ascii_uppercase())
    }
}

/// Returns true if an optional text field is absent or blank
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
