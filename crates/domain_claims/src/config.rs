//! Engine configuration
//!
//! Two values are deliberately left to product owners: how close to the
//! filing deadline a claim must be before it is flagged, and how a warning
//! status is spelled in rendered output. Both candidates are named here and
//! the defaults can be overridden per deployment.

use serde::Deserialize;

use core_kernel::{CoreError, Timezone};

use crate::error::ClaimError;

/// Default days-remaining threshold for a timely-filing warning
pub const NEAR_DEADLINE_THRESHOLD_DAYS: i64 = 30;

/// Alternate threshold found in older billing guidance
pub const ALT_NEAR_DEADLINE_THRESHOLD_DAYS: i64 = 14;

/// Filing window applied when a payer has no entry in the payer table
pub const DEFAULT_FILING_WINDOW_DAYS: i64 = 90;

/// Canonical warning status label
pub const WARNING_LABEL: &str = "WARNING";

/// Alternate warning label accepted on input and selectable for output
pub const ALT_WARNING_LABEL: &str = "WARN";

/// Runtime settings for the rule engine
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Days remaining at or below which timely filing reports a warning
    pub near_deadline_threshold_days: i64,
    /// Filing window for payers missing from the payer table
    pub default_filing_window_days: i64,
    /// Calendar used to count elapsed filing days
    pub filing_timezone: Timezone,
    /// Spelling used when rendering warning statuses
    pub warning_label: String,
    /// Evaluate rules on the rayon thread pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            near_deadline_threshold_days: NEAR_DEADLINE_THRESHOLD_DAYS,
            default_filing_window_days: DEFAULT_FILING_WINDOW_DAYS,
            filing_timezone: Timezone::default(),
            warning_label: WARNING_LABEL.to_string(),
            parallel: false,
        }
    }
}

impl EngineConfig {
    /// Sets the near-deadline threshold
    pub fn with_near_deadline_threshold(mut self, days: i64) -> Self {
        self.near_deadline_threshold_days = days;
        self
    }

    /// Sets the fallback filing window
    pub fn with_default_filing_window(mut self, days: i64) -> Self {
        self.default_filing_window_days = days;
        self
    }

    /// Sets the filing calendar timezone
    pub fn with_filing_timezone(mut self, tz: Timezone) -> Self {
        self.filing_timezone = tz;
        self
    }

    /// Sets the filing calendar from an IANA timezone name
    pub fn with_filing_timezone_name(self, name: &str) -> Result<Self, ClaimError> {
        let tz = Timezone::parse(name).map_err(CoreError::from)?;
        Ok(self.with_filing_timezone(tz))
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ClaimError> {
        if self.near_deadline_threshold_days < 0 {
            return Err(ClaimError::InvalidConfig(format!(
                "near_deadline_threshold_days must not be negative, got {}",
                self.near_deadline_threshold_days
            )));
        }
        if self.default_filing_window_days <= 0 {
            return Err(ClaimError::InvalidConfig(format!(
                "default_filing_window_days must be positive, got {}",
                self.default_filing_window_days
            )));
        }
        if self.warning_label.trim().is_empty() {
            return Err(ClaimError::InvalidConfig(
                "warning_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
