//! UTC normalization for timestamps crossing the engine boundary.
//!
//! Everything inside the engine is `DateTime<Utc>`. Host data arrives as
//! strings: naive timestamps are taken as UTC by convention, offset-aware
//! timestamps are converted, and anything else is a [`EngineError::TimezoneViolation`].

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::EngineError;

/// Formats accepted for naive (offset-less) timestamps.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp string into a UTC instant.
///
/// Offset-aware input (RFC 3339) is converted to UTC; naive input is
/// assumed to already be UTC.
pub fn parse_utc(raw: &str) -> Result<DateTime<Utc>, EngineError> {
    let raw = raw.trim();

    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Ok(aware.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(EngineError::TimezoneViolation(raw.to_string()))
}
