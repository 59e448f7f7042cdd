// Sensor reading domain models
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One raw telemetry sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub sensor_id: String,
    pub sensor_type: String,
    pub location: String,
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

/// A min/mean/max summary over a bucket ending at `timestamp`.
///
/// No ordering between the three values is assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedReading {
    pub sensor_id: String,
    pub sensor_type: String,
    pub location: String,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    pub name: String,
    pub sensor_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorInfo {
    pub sensor_id: String,
    pub sensor_type: String,
    pub location: String,
}

/// Fields shared by raw and aggregated records.
pub trait Record {
    fn sensor_type(&self) -> &str;
    fn unit(&self) -> &str;
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Record for Reading {
    fn sensor_type(&self) -> &str {
        &self.sensor_type
    }

    fn unit(&self) -> &str {
        &self.unit
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Record for AggregatedReading {
    fn sensor_type(&self) -> &str {
        &self.sensor_type
    }

    fn unit(&self) -> &str {
        &self.unit
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
