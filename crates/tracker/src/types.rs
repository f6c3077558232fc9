//! Shared value types for the workout-tracker domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! meaningful values with invariants (durations are finite and non-negative,
//! timestamps are normalized to UTC).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Parse, Validator};

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

/// A duration in seconds, finite and non-negative.
///
/// Used for the time spent performing a set and the rest taken after it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Seconds(f64);

impl Seconds {
    /// Creates a [`Seconds`] value.
    ///
    /// Returns `None` if `value` is negative, infinite, or NaN.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value >= 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Creates a zero-length duration.
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Returns the underlying `f64` value.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

impl TryFrom<f64> for Seconds {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{value} is not a non-negative number of seconds"))
    }
}

impl From<Seconds> for f64 {
    fn from(seconds: Seconds) -> f64 {
        seconds.0
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API. Serializes as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    fn parse_iso(raw: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        // Date-only strings are read as midnight UTC.
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

/// A timestamp as supplied by a caller: either already native or an
/// ISO-8601 string still to be parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Native(Timestamp),
    Iso(String),
}

impl From<Timestamp> for RawTimestamp {
    fn from(ts: Timestamp) -> Self {
        RawTimestamp::Native(ts)
    }
}

impl From<DateTime<Utc>> for RawTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        RawTimestamp::Native(Timestamp(dt))
    }
}

impl From<&str> for RawTimestamp {
    fn from(raw: &str) -> Self {
        RawTimestamp::Iso(raw.to_owned())
    }
}

impl From<String> for RawTimestamp {
    fn from(raw: String) -> Self {
        RawTimestamp::Iso(raw)
    }
}

impl Parse for Timestamp {
    type Raw = RawTimestamp;

    fn validate(raw: RawTimestamp, v: &mut Validator) -> Option<Self> {
        match raw {
            RawTimestamp::Native(ts) => Some(ts),
            RawTimestamp::Iso(s) => {
                let parsed = Self::parse_iso(&s);
                if parsed.is_none() {
                    v.report(format!("'{s}' is not an ISO-8601 timestamp"));
                }
                parsed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn seconds_rejects_negative_and_non_finite() {
        assert!(Seconds::new(-0.5).is_none());
        assert!(Seconds::new(f64::NAN).is_none());
        assert!(Seconds::new(f64::INFINITY).is_none());
        assert_eq!(Seconds::new(90.0).map(Seconds::as_f64), Some(90.0));
        assert_eq!(Seconds::zero().as_f64(), 0.0);
    }

    #[test]
    fn seconds_serde_is_validated() {
        assert!(serde_json::from_str::<Seconds>("-3").is_err());
        let s: Seconds = serde_json::from_str("45").unwrap();
        assert_eq!(serde_json::to_string(&s).unwrap(), "45.0");
    }

    #[test]
    fn iso_strings_normalize_to_utc() {
        let ts = Timestamp::parse(RawTimestamp::from("2024-03-01T10:00:00+02:00")).unwrap();
        assert_eq!(
            ts.as_datetime(),
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn date_only_strings_are_midnight_utc() {
        let ts = Timestamp::parse(RawTimestamp::from("2024-03-01")).unwrap();
        assert_eq!(
            ts.as_datetime(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn native_timestamps_pass_through() {
        let now = Timestamp::now();
        assert_eq!(Timestamp::parse(RawTimestamp::from(now)).unwrap(), now);
    }

    #[test]
    fn garbage_strings_are_rejected() {
        let err = Timestamp::parse(RawTimestamp::from("yesterday-ish")).unwrap_err();
        assert_eq!(err.path, "value");
        assert!(err.message.contains("ISO-8601"));
    }

    #[test]
    fn raw_timestamp_deserializes_strings_either_way() {
        let good: RawTimestamp = serde_json::from_str("\"2024-03-01T10:00:00Z\"").unwrap();
        assert!(matches!(good, RawTimestamp::Native(_)));
        let bad: RawTimestamp = serde_json::from_str("\"not a date\"").unwrap();
        assert!(matches!(bad, RawTimestamp::Iso(_)));
    }
}
