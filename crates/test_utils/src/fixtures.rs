//! Pre-built Test Fixtures
//!
//! Ready-to-use claims, provider identifiers and evaluation instants.
//! Fixtures are fixed values so that expectations in tests stay stable.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;

use domain_claims::{Claim, Gender, ServiceLine};

/// Fixture for provider identifiers
pub struct NpiFixtures;

impl NpiFixtures {
    /// Textbook example identifier with a valid check digit
    pub fn valid() -> &'static str {
        "1234567893"
    }

    /// A second valid identifier
    pub fn valid_alternate() -> &'static str {
        "1245319599"
    }

    /// Ten digits with a wrong check digit
    pub fn bad_checksum() -> &'static str {
        "1234567890"
    }

    /// All zeros, which fails the prefixed checksum
    pub fn all_zeros() -> &'static str {
        "0000000000"
    }

    /// Appends the check digit to a 9-digit base
    ///
    /// The check digit is computed over the base prefixed with `80840`.
    pub fn with_check_digit(base: &str) -> String {
        let prefixed = format!("80840{}", base);
        let sum: u32 = prefixed
            .chars()
            .rev()
            .filter_map(|c| c.to_digit(10))
            .enumerate()
            .map(|(i, d)| {
                // Rightmost payload digit sits next to the check digit, so it is doubled
                if i % 2 == 0 {
                    let doubled = d * 2;
                    if doubled > 9 {
                        doubled - 9
                    } else {
                        doubled
                    }
                } else {
                    d
                }
            })
            .sum();
        format!("{}{}", base, (10 - sum % 10) % 10)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard evaluation instant (Jun 15, 2024 12:00 UTC)
    pub fn evaluation_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    /// Calendar date `days` before the standard evaluation instant
    pub fn days_before_evaluation(days: i64) -> NaiveDate {
        (Self::evaluation_time() - Duration::days(days)).date_naive()
    }

    /// Patient date of birth
    pub fn date_of_birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1968, 3, 14).unwrap()
    }
}

/// Fixture for whole claims
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// An office visit claim that passes every default rule
    pub fn clean() -> Claim {
        let mut claim = Claim::new();
        claim.patient.name = Some("Eleanor Whitfield".to_string());
        claim.patient.date_of_birth = Some(TemporalFixtures::date_of_birth());
        claim.patient.gender = Some(Gender::Female);
        claim.insurance.member_id = Some("AET889120034".to_string());
        claim.insurance.payer_id = Some("AETNA".to_string());
        claim.insurance.payer_name = Some("Aetna".to_string());
        claim.provider.npi = Some(NpiFixtures::valid().to_string());
        claim.provider.name = Some("Harbor Family Medicine".to_string());
        claim.date_of_service = Some(TemporalFixtures::days_before_evaluation(12));
        claim.place_of_service = Some("11".to_string());
        claim.add_line(ServiceLine::new("99213", dec!(135.00)).with_diagnosis("J06.9"));
        claim.add_line(ServiceLine::new("36415", dec!(12.00)).with_diagnosis("J06.9"));
        claim
    }

    /// Breast cancer chemotherapy infusion with its supporting diagnosis
    pub fn chemotherapy() -> Claim {
        let mut claim = Self::clean();
        claim.service_lines = vec![ServiceLine::new("96413", dec!(612.00)).with_diagnosis("C50.911")];
        claim
    }

    /// First and additional infusion hours billed together
    pub fn bundled_chemotherapy() -> Claim {
        let mut claim = Self::chemotherapy();
        claim.add_line(ServiceLine::new("96415", dec!(140.00)).with_diagnosis("C50.911"));
        claim
    }

    /// Vaginal and cesarean global obstetric packages on one claim
    pub fn obstetric_conflict() -> Claim {
        let mut claim = Self::clean();
        claim.service_lines = vec![
            ServiceLine::new("59400", dec!(3100.00)).with_diagnosis("O80"),
            ServiceLine::new("59510", dec!(3600.00))
                .with_diagnosis("O82")
                .with_modifier("59"),
        ];
        claim
    }

    /// A claim with nothing filled in
    pub fn empty() -> Claim {
        Claim::new()
    }
}
