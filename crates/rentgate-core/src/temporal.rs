//! # Temporal Types — UTC-Only Timestamps
//!
//! Defines `Timestamp`, a UTC-only timestamp type truncated to seconds
//! precision, and the day arithmetic that all entitlement expiry math
//! flows through.
//!
//! ## Invariant
//!
//! Every instant in Rentgate is UTC. Inputs carrying a timezone offset are
//! converted at construction; there is no local-time representation anywhere
//! in the system, so "expires at midnight" cannot mean two different moments
//! on two machines.
//!
//! ## Day Arithmetic
//!
//! Entitlements are sold in whole days and evaluated with calendar-day
//! rounding up: a remaining partial day counts as a full day. Both directions
//! of that math live here — [`Timestamp::plus_days`] for settlement
//! extension and [`Timestamp::seconds_until`]/[`days_remaining_ceil`] for
//! evaluation — so the rounding rule has exactly one definition.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Seconds in one calendar day.
const SECS_PER_DAY: i64 = 86_400;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// # Construction
///
/// - [`Timestamp::now()`] — current UTC time, truncated.
/// - [`Timestamp::from_utc()`] — from a `DateTime<Utc>`, truncating sub-seconds.
/// - [`Timestamp::parse()`] — from an RFC 3339 string, any offset, converted
///   to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
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

    /// Parse a timestamp from an RFC 3339 string.
    ///
    /// Accepts any timezone offset and converts to UTC. The result always
    /// has seconds precision.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            CoreError::InvalidTimestamp(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, CoreError> {
        let dt = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| CoreError::InvalidTimestamp(format!("invalid Unix timestamp: {secs}")))?;
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

    /// Render as ISO 8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// This instant advanced by a whole number of calendar days.
    ///
    /// Settlement extension math: `base + days_to_add days`. Negative input
    /// moves backward; the settlement layer rejects non-positive durations
    /// before reaching this.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Signed seconds from `self` until `other` (positive when `other` is
    /// in the future).
    pub fn seconds_until(&self, other: &Timestamp) -> i64 {
        (other.0 - self.0).num_seconds()
    }
}

/// Remaining whole days until expiry, rounding a partial day up.
///
/// `ceil(remaining_seconds / 86 400)`: one remaining second counts as one
/// day; an expiry exactly now or in the past yields zero or a negative
/// count. The evaluator treats any value `<= 0` as expired.
pub fn days_remaining_ceil(now: &Timestamp, expires_at: &Timestamp) -> i64 {
    let secs = now.seconds_until(expires_at);
    // Truncating division already rounds toward zero, which is ceil for
    // negative remainders; only a positive remainder needs the bump.
    let q = secs / SECS_PER_DAY;
    if secs % SECS_PER_DAY > 0 {
        q + 1
    } else {
        q
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn test_now_has_no_subseconds() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let dt_with_nanos = dt.with_nanosecond(123_456_789).unwrap();
        let t = Timestamp::from_utc(dt_with_nanos);
        assert_eq!(t.as_datetime().nanosecond(), 0);
        assert_eq!(t.to_iso8601(), "2026-01-15T12:30:45Z");
    }

    #[test]
    fn test_parse_converts_offset_to_utc() {
        let t = Timestamp::parse("2026-01-15T17:00:00+05:00").unwrap();
        assert_eq!(t.to_iso8601(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn test_parse_invalid_format() {
        assert!(Timestamp::parse("not-a-date").is_err());
        assert!(Timestamp::parse("2026-01-15").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn test_epoch_roundtrip() {
        let t = ts("2026-01-15T12:00:00Z");
        assert_eq!(Timestamp::from_epoch_secs(t.epoch_secs()).unwrap(), t);
    }

    #[test]
    fn test_ordering() {
        assert!(ts("2026-01-15T12:00:00Z") < ts("2026-01-15T12:00:01Z"));
    }

    #[test]
    fn test_plus_days() {
        let t = ts("2026-01-15T12:00:00Z");
        assert_eq!(t.plus_days(30).to_iso8601(), "2026-02-14T12:00:00Z");
        assert_eq!(t.plus_days(0), t);
    }

    #[test]
    fn test_seconds_until_signs() {
        let earlier = ts("2026-01-15T12:00:00Z");
        let later = ts("2026-01-15T12:00:30Z");
        assert_eq!(earlier.seconds_until(&later), 30);
        assert_eq!(later.seconds_until(&earlier), -30);
        assert_eq!(earlier.seconds_until(&earlier), 0);
    }

    // ---- ceil-rounded remaining days ----

    #[test]
    fn test_days_remaining_exact_days() {
        let now = ts("2026-01-15T12:00:00Z");
        assert_eq!(days_remaining_ceil(&now, &now.plus_days(5)), 5);
        assert_eq!(days_remaining_ceil(&now, &now.plus_days(1)), 1);
    }

    #[test]
    fn test_days_remaining_partial_day_rounds_up() {
        let now = ts("2026-01-15T12:00:00Z");
        let one_second = ts("2026-01-15T12:00:01Z");
        assert_eq!(days_remaining_ceil(&now, &one_second), 1);

        let day_and_a_bit = ts("2026-01-16T12:00:01Z");
        assert_eq!(days_remaining_ceil(&now, &day_and_a_bit), 2);
    }

    #[test]
    fn test_days_remaining_expired() {
        let now = ts("2026-01-15T12:00:00Z");
        assert_eq!(days_remaining_ceil(&now, &now), 0);

        let just_past = ts("2026-01-15T11:59:59Z");
        assert_eq!(days_remaining_ceil(&now, &just_past), 0);

        let long_past = ts("2026-01-13T12:00:00Z");
        assert_eq!(days_remaining_ceil(&now, &long_past), -2);
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = ts("2026-01-15T12:00:00Z");
        let json = serde_json::to_string(&t).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(t, parsed);
    }
}
