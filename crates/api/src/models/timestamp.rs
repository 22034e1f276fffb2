//! Server-stamped timestamps.
//!
//! Timestamps are written as RFC 3339 UTC with exactly six fractional digits
//! (`2025-01-31T09:15:02.123456Z`). The fixed width makes the string order
//! equal to the chronological order, which the store relies on when sorting
//! documents by `created_at`.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Current time truncated to the stored precision.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a timestamp the way it is stored.
#[must_use]
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Serialize with [`format`].
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(value))
}

/// Accept any RFC 3339 timestamp.
///
/// # Errors
///
/// Fails when the input is not a valid RFC 3339 string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(format(&whole), "2025-03-01T12:00:00.000000Z");
    }

    #[test]
    fn test_string_order_is_chronological() {
        let earlier = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let later = earlier + chrono::Duration::microseconds(1);
        assert!(format(&earlier) < format(&later));
    }

    #[test]
    fn test_now_has_micro_precision() {
        let stamp = now();
        assert_eq!(stamp.timestamp_subsec_nanos() % 1_000, 0);
    }
}
