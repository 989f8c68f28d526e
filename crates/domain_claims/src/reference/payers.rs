//! Payer filing policies

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Timely-filing policy for one payer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayerPolicy {
    pub name: &'static str,
    pub filing_window_days: i64,
}

static PAYERS: Lazy<HashMap<&'static str, PayerPolicy>> = Lazy::new(|| {
    HashMap::from([
        ("MEDICARE", PayerPolicy { name: "Medicare", filing_window_days: 365 }),
        ("MEDICAID", PayerPolicy { name: "Medicaid", filing_window_days: 365 }),
        ("TRICARE", PayerPolicy { name: "TRICARE", filing_window_days: 365 }),
        ("BCBS", PayerPolicy { name: "Blue Cross Blue Shield", filing_window_days: 180 }),
        ("HUMANA", PayerPolicy { name: "Humana", filing_window_days: 180 }),
        ("AETNA", PayerPolicy { name: "Aetna", filing_window_days: 120 }),
        ("UHC", PayerPolicy { name: "UnitedHealthcare", filing_window_days: 90 }),
        ("CIGNA", PayerPolicy { name: "Cigna", filing_window_days: 90 }),
        ("ANTHEM", PayerPolicy { name: "Anthem", filing_window_days: 90 }),
    ])
});

/// Looks up a payer by id, ignoring case and surrounding whitespace
pub fn payer_policy(payer_id: &str) -> Option<&'static PayerPolicy> {
    PAYERS.get(payer_id.trim().to_ascii_uppercase().as_str())
}

/// Filing window for a payer, if the payer is known
pub fn filing_window_days(payer_id: &str) -> Option<i64> {
    payer_policy(payer_id).map(|p| p.filing_window_days)
}
