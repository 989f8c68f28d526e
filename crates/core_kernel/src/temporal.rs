//! Calendar-day arithmetic for deadline checks
//!
//! Filing deadlines are counted in whole calendar days. The evaluation
//! timestamp is an instant in UTC, while a date of service is a plain
//! calendar date, so the instant is first projected onto a calendar in a
//! chosen timezone before the two are compared.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use std::str::FromStr;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Timezone wrapper used when counting calendar days
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Timezone::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Parses an IANA timezone name such as `America/New_York`
    pub fn parse(name: &str) -> Result<Self, TemporalError> {
        Tz::from_str(name.trim())
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(name.to_string()))
    }

    /// Returns the calendar date of a UTC instant in this timezone
    pub fn local_date(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.0).date_naive()
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Whole calendar days from `start` to `end` (negative when `end` precedes `start`)
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// Whole calendar days elapsed between a date and an instant
///
/// The instant is converted to a calendar date in `tz` first, so an
/// evaluation at 23:30 in New York still counts as the same local day.
pub fn elapsed_days(since: NaiveDate, at: DateTime<Utc>, tz: Timezone) -> i64 {
    days_between(since, tz.local_date(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_days_between() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(days_between(start, end), 60);
        assert_eq!(days_between(end, start), -60);
    }

    #[test]
    fn test_elapsed_days_uses_local_calendar() {
        let service = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        // 02:00 UTC on June 11 is still June 10 in New York
        let at = Utc.with_ymd_and_hms(2024, 6, 11, 2, 0, 0).unwrap();

        assert_eq!(elapsed_days(service, at, Timezone::default()), 10);
        let ny = Timezone::parse("America/New_York").unwrap();
        assert_eq!(elapsed_days(service, at, ny), 9);
    }

    #[test]
    fn test_parse_unknown_timezone() {
        let err = Timezone::parse("Mars/Olympus_Mons").unwrap_err();
        assert_eq!(err, TemporalError::UnknownTimezone("Mars/Olympus_Mons".to_string()));
    }

    #[test]
    fn test_timezone_serde_round_trip() {
        let tz = Timezone::parse("Europe/London").unwrap();
        let json = serde_json::to_string(&tz).unwrap();
        assert_eq!(json, "\"Europe/London\"");
    }
}
