//! Test Data Builders
//!
//! Builders start from the clean fixture claim so tests only state the
//! fields that matter to them.

use chrono::NaiveDate;
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_claims::{Claim, ServiceLine};

use crate::fixtures::{ClaimFixtures, TemporalFixtures};

/// Builder for constructing test claims
pub struct ClaimBuilder {
    claim: Claim,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Starts from the clean fixture claim
    pub fn new() -> Self {
        Self {
            claim: ClaimFixtures::clean(),
        }
    }

    /// Starts from a claim with no fields set
    pub fn empty() -> Self {
        Self {
            claim: ClaimFixtures::empty(),
        }
    }

    /// Replaces patient and provider names with generated ones
    pub fn with_random_names(mut self) -> Self {
        self.claim.patient.name = Some(Name().fake());
        self.claim.provider.name = Some(CompanyName().fake());
        self
    }

    /// Sets the provider identifier
    pub fn with_npi(mut self, npi: impl Into<String>) -> Self {
        self.claim.provider.npi = Some(npi.into());
        self
    }

    /// Removes the provider identifier
    pub fn without_npi(mut self) -> Self {
        self.claim.provider.npi = None;
        self
    }

    /// Sets the payer identifier
    pub fn with_payer(mut self, payer_id: impl Into<String>) -> Self {
        self.claim.insurance.payer_id = Some(payer_id.into());
        self
    }

    /// Sets the date of service
    pub fn with_date_of_service(mut self, date: NaiveDate) -> Self {
        self.claim.date_of_service = Some(date);
        self
    }

    /// Places the date of service `days` before the standard evaluation time
    pub fn serviced_days_ago(self, days: i64) -> Self {
        self.with_date_of_service(TemporalFixtures::days_before_evaluation(days))
    }

    /// Removes the patient name
    pub fn without_patient_name(mut self) -> Self {
        self.claim.patient.name = None;
        self
    }

    /// Drops every service line
    pub fn without_lines(mut self) -> Self {
        self.claim.service_lines.clear();
        self
    }

    /// Appends a service line
    pub fn with_line(mut self, line: ServiceLine) -> Self {
        self.claim.add_line(line);
        self
    }

    /// Replaces all service lines
    pub fn with_lines(mut self, lines: Vec<ServiceLine>) -> Self {
        self.claim.service_lines = lines;
        self
    }

    pub fn build(self) -> Claim {
        self.claim
    }
}

/// Builder for constructing test service lines
pub struct ServiceLineBuilder {
    procedure_code: String,
    modifiers: Vec<String>,
    diagnosis_codes: Vec<String>,
    units: u32,
    charge_amount: Decimal,
}

impl ServiceLineBuilder {
    /// Single unit of `procedure_code` at a standard charge
    pub fn new(procedure_code: impl Into<String>) -> Self {
        Self {
            procedure_code: procedure_code.into(),
            modifiers: Vec::new(),
            diagnosis_codes: Vec::new(),
            units: 1,
            charge_amount: dec!(100.00),
        }
    }

    pub fn modifier(mut self, code: impl Into<String>) -> Self {
        self.modifiers.push(code.into());
        self
    }

    pub fn diagnosis(mut self, code: impl Into<String>) -> Self {
        self.diagnosis_codes.push(code.into());
        self
    }

    pub fn units(mut self, units: u32) -> Self {
        self.units = units;
        self
    }

    pub fn charge(mut self, amount: Decimal) -> Self {
        self.charge_amount = amount;
        self
    }

    pub fn build(self) -> ServiceLine {
        let mut line = ServiceLine::new(self.procedure_code, self.charge_amount).with_units(self.units);
        line.modifiers = self.modifiers;
        line.diagnosis_codes = self.diagnosis_codes;
        line
    }
}
