//! Canonical timezone and timestamp helpers.
//!
//! Every timestamp in the crate lives in one fixed offset, Indian Standard
//! Time (UTC+05:30). Stored records carry naive `YYYY-MM-DD HH:MM:SS` values
//! that are interpreted in this offset; schedule windows are displayed as
//! time-of-day only.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeDelta, Utc};
use serde::Serializer;
use thiserror::Error;

/// Offset of the canonical timezone from UTC, in seconds (+05:30).
pub const CANONICAL_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Layout of stored timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout of displayed schedule windows.
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// The canonical timezone (UTC+05:30).
pub fn canonical_offset() -> FixedOffset {
    // In range: |offset| < 24h.
    FixedOffset::east_opt(CANONICAL_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// The current instant in the canonical timezone.
pub fn now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&canonical_offset())
}

/// A stored timestamp that cannot be turned into an instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    /// The text does not match [`TIMESTAMP_FORMAT`].
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
    /// The wall-clock value has no UTC instant within chrono's range.
    #[error("{0} is outside the representable time range")]
    OutOfRange(NaiveDateTime),
}

/// Interprets a naive wall-clock value in the canonical timezone.
///
/// Returns `None` when shifting to UTC leaves chrono's supported range.
pub fn from_naive(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    let offset = canonical_offset();
    let utc = naive.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?;
    Some(DateTime::from_naive_utc_and_offset(utc, offset))
}

/// Parses a `YYYY-MM-DD HH:MM:SS` value as a canonical-timezone instant.
pub fn parse_timestamp(s: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)?;
    from_naive(naive).ok_or(TimestampError::OutOfRange(naive))
}

/// Formats an instant as `YYYY-MM-DD HH:MM:SS` in the canonical timezone.
pub fn format_timestamp(dt: &DateTime<FixedOffset>) -> String {
    dt.with_timezone(&canonical_offset())
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Formats an instant as time-of-day (`HH:MM:SS`) in the canonical timezone.
pub fn format_clock(dt: &DateTime<FixedOffset>) -> String {
    dt.with_timezone(&canonical_offset())
        .format(CLOCK_FORMAT)
        .to_string()
}

pub(crate) fn serialize_clock<S: Serializer>(
    dt: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_clock(dt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_in_canonical_offset() {
        let ts = parse_timestamp("2025-03-01 12:30:00").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), CANONICAL_OFFSET_SECS);
        // 12:30 IST == 07:00 UTC
        assert_eq!(
            ts.with_timezone(&Utc).format("%H:%M").to_string(),
            "07:00"
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2025-03-01T12:30:00").is_err());
        assert!(parse_timestamp("2025-13-01 12:30:00").is_err());
    }

    #[test]
    fn test_from_naive_at_range_edges() {
        assert_eq!(from_naive(NaiveDateTime::MIN), None);
        assert!(from_naive(NaiveDateTime::MAX).is_some());

        let text = NaiveDateTime::MIN.format(TIMESTAMP_FORMAT).to_string();
        assert!(parse_timestamp(&text).is_err());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert!(parse_timestamp("  2025-03-01 12:30:00 ").is_ok());
    }

    #[test]
    fn test_format_round_trip() {
        let ts = parse_timestamp("2025-03-01 23:59:59").unwrap();
        assert_eq!(format_timestamp(&ts), "2025-03-01 23:59:59");
        assert_eq!(format_clock(&ts), "23:59:59");
    }

    #[test]
    fn test_format_converts_foreign_offset() {
        let utc = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap().fixed_offset();
        assert_eq!(format_clock(&utc), "05:30:00");
    }

    #[test]
    fn test_now_is_canonical() {
        assert_eq!(now().offset().local_minus_utc(), CANONICAL_OFFSET_SECS);
    }
}
