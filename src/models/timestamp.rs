//! Generated timestamps.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// A UTC instant stored as an RFC 3339 string with millisecond precision,
/// e.g. `2024-03-01T12:30:00.000Z`.
///
/// Used for the timestamps this crate generates itself. Timestamps copied
/// from legacy documents are kept as opaque JSON values and never parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// The stored JSON representation.
    pub fn to_value(&self) -> JsonValue {
        JsonValue::String(self.to_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_value_is_rfc3339_utc() {
        let ts = Timestamp::from(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
        assert_eq!(ts.to_value(), JsonValue::String("2024-03-01T12:30:00.000Z".into()));
    }

    #[test]
    fn test_serialize_matches_to_value() {
        let whole = Timestamp::from(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap());
        let fractional = Timestamp::from(
            Utc.timestamp_opt(1_705_309_200, 123_456_789).unwrap(),
        );

        for ts in [whole, fractional] {
            assert_eq!(serde_json::to_value(ts).unwrap(), ts.to_value());
        }
        assert_eq!(
            fractional.to_value(),
            JsonValue::String("2024-01-15T09:00:00.123Z".into())
        );
    }

    #[test]
    fn test_deserialize_accepts_offsets() {
        let ts: Timestamp = serde_json::from_value(JsonValue::String(
            "2024-03-01T14:30:00.000+02:00".into(),
        ))
        .unwrap();
        assert_eq!(ts.to_string(), "2024-03-01T12:30:00.000Z");
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let result: Result<Timestamp, _> =
            serde_json::from_value(JsonValue::String("yesterday".into()));
        assert!(result.is_err());
    }
}
