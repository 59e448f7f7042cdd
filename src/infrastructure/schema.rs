// GraphQL schema adapter - Field naming and wire record decoding
use crate::domain::reading::{AggregatedReading, LocationInfo, Reading, SensorInfo};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::borrow::Cow;

/// Naming convention of the backend schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaNaming {
    #[default]
    Camel,
    Snake,
}

impl SchemaNaming {
    /// Spell a camelCase field name in this convention.
    pub fn field(self, camel: &str) -> Cow<'_, str> {
        match self {
            SchemaNaming::Camel => Cow::Borrowed(camel),
            SchemaNaming::Snake => Cow::Owned(to_snake_case(camel)),
        }
    }
}

fn to_snake_case(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for c in camel.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

// Wire records accept both spellings of every field.

#[derive(Debug, Deserialize)]
pub struct WireLocation {
    name: String,
    #[serde(rename = "sensorCount", alias = "sensor_count")]
    sensor_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct WireSensor {
    #[serde(rename = "sensorId", alias = "sensor_id")]
    sensor_id: String,
    #[serde(rename = "sensorType", alias = "sensor_type")]
    sensor_type: String,
    location: String,
}

#[derive(Debug, Deserialize)]
pub struct WireReading {
    #[serde(rename = "sensorId", alias = "sensor_id")]
    sensor_id: String,
    #[serde(rename = "sensorType", alias = "sensor_type")]
    sensor_type: String,
    location: String,
    value: f64,
    unit: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct WireAggregatedReading {
    #[serde(rename = "sensorId", alias = "sensor_id")]
    sensor_id: String,
    #[serde(rename = "sensorType", alias = "sensor_type")]
    sensor_type: String,
    location: String,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    mean: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
    unit: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    timestamp: DateTime<Utc>,
}

impl From<WireLocation> for LocationInfo {
    fn from(wire: WireLocation) -> Self {
        Self {
            name: wire.name,
            sensor_count: wire.sensor_count,
        }
    }
}

impl From<WireSensor> for SensorInfo {
    fn from(wire: WireSensor) -> Self {
        Self {
            sensor_id: wire.sensor_id,
            sensor_type: wire.sensor_type,
            location: wire.location,
        }
    }
}

impl From<WireReading> for Reading {
    fn from(wire: WireReading) -> Self {
        Self {
            sensor_id: wire.sensor_id,
            sensor_type: wire.sensor_type,
            location: wire.location,
            value: wire.value,
            unit: wire.unit,
            timestamp: wire.timestamp,
        }
    }
}

impl From<WireAggregatedReading> for AggregatedReading {
    fn from(wire: WireAggregatedReading) -> Self {
        // Missing aggregates default to zero, as the backend does.
        Self {
            sensor_id: wire.sensor_id,
            sensor_type: wire.sensor_type,
            location: wire.location,
            min: wire.min.unwrap_or(0.0),
            mean: wire.mean.unwrap_or(0.0),
            max: wire.max.unwrap_or(0.0),
            unit: wire.unit,
            timestamp: wire.timestamp,
        }
    }
}

/// RFC 3339, or a naive ISO-8601 timestamp taken as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp `{raw}`")))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_field_naming() {
        assert_eq!(SchemaNaming::Camel.field("sensorReadings"), "sensorReadings");
        assert_eq!(SchemaNaming::Snake.field("sensorReadings"), "sensor_readings");
        assert_eq!(SchemaNaming::Snake.field("sensorCount"), "sensor_count");
        assert_eq!(SchemaNaming::Snake.field("location"), "location");
    }

    #[test]
    fn test_reading_decodes_from_both_conventions() {
        let camel = serde_json::json!({
            "sensorId": "t-1", "sensorType": "temperature", "location": "lab",
            "value": 21.5, "unit": "°C", "timestamp": "2024-05-01T10:00:00+00:00"
        });
        let snake = serde_json::json!({
            "sensor_id": "t-1", "sensor_type": "temperature", "location": "lab",
            "value": 21.5, "unit": "°C", "timestamp": "2024-05-01T10:00:00Z"
        });

        let a: Reading = serde_json::from_value::<WireReading>(camel).unwrap().into();
        let b: Reading = serde_json::from_value::<WireReading>(snake).unwrap().into();
        assert_eq!(a, b);
        assert_eq!(a.timestamp, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_aggregated_nulls_default_to_zero() {
        let wire = serde_json::json!({
            "sensorId": "e-1", "sensorType": "electricity", "location": "plant",
            "min": null, "mean": 3, "unit": "kW", "timestamp": "2024-05-01T10:00:00.250"
        });

        let reading: AggregatedReading = serde_json::from_value::<WireAggregatedReading>(wire)
            .unwrap()
            .into();
        assert_eq!(reading.min, 0.0);
        assert_eq!(reading.mean, 3.0);
        assert_eq!(reading.max, 0.0);
        assert_eq!(reading.timestamp.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_invalid_timestamp_fails_decoding() {
        let wire = serde_json::json!({
            "sensorId": "t-1", "sensorType": "temperature", "location": "lab",
            "value": 1.0, "unit": "°C", "timestamp": "yesterday"
        });
        assert!(serde_json::from_value::<WireReading>(wire).is_err());
    }
}
