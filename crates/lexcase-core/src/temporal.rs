//! # Temporal Types: UTC-Only Timestamps
//!
//! Defines `Timestamp`, the only time type that appears in a case snapshot.
//!
//! Snapshot fields arrive from several independent stores (request rows,
//! audit rows, opinion versions). Normalizing them all to UTC with seconds
//! precision at the boundary means ordering comparisons between them are
//! meaningful and the snapshot digest does not depend on which store wrote
//! the value or in which offset.
//!
//! The engine never reads the wall clock. [`Timestamp::now()`] exists for
//! callers (the CLI, snapshot assemblers) that need to supply a reference
//! instant explicitly.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LexcaseError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`]: current UTC time, truncated.
/// - [`Timestamp::from_utc()`]: from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`]: strict, `Z` suffix only.
/// - [`Timestamp::parse_lenient()`]: any RFC 3339 offset, converted to UTC.
/// - Deserialization: any RFC 3339 offset, converted to UTC and truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 string with a `Z` suffix.
    ///
    /// Explicit offsets (including `+00:00`) are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`LexcaseError::InvalidTimestamp`] if the string is not valid
    /// RFC 3339 or does not end in `Z`.
    pub fn parse(s: &str) -> Result<Self, LexcaseError> {
        if !s.ends_with('Z') {
            return Err(LexcaseError::InvalidTimestamp(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        Self::parse_lenient(s)
    }

    /// Parse a timestamp from an RFC 3339 string, accepting any offset and
    /// converting to UTC.
    ///
    /// Database drivers frequently render `timestamptz` columns with
    /// `+00:00`; snapshot assemblers should use this entry point.
    pub fn parse_lenient(s: &str) -> Result<Self, LexcaseError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            LexcaseError::InvalidTimestamp(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, LexcaseError> {
        let dt = DateTime::from_timestamp(secs, 0).ok_or_else(|| {
            LexcaseError::InvalidTimestamp(format!("invalid Unix timestamp: {secs}"))
        })?;
        Ok(Self(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Signed duration from `self` until `later`. Negative if `later` is
    /// before `self`.
    pub fn until(&self, later: &Timestamp) -> Duration {
        later.0 - self.0
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DateTime::<Utc>::deserialize(deserializer).map(Self::from_utc)
    }
}

impl std::str::FromStr for Timestamp {
    type Err = LexcaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s)
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
