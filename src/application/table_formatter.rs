// Table formatter - Row-level display strings for the readings tables
use crate::domain::reading::{AggregatedReading, Reading};
use crate::domain::table::{Table, TableRow};
use chrono::{DateTime, Local, Utc};
use serde::Deserialize;

const READING_COLUMNS: [&str; 6] = ["Sensor ID", "Type", "Location", "Value", "Unit", "Timestamp"];
const AGGREGATED_COLUMNS: [&str; 8] = [
    "Sensor ID",
    "Type",
    "Location",
    "Min",
    "Mean",
    "Max",
    "Unit",
    "Timestamp",
];

const NO_DATA: &str = "No data available";
const NO_AGGREGATED_DATA: &str = "No aggregated data available";

// Output depends on the zone, so it is not stable across deployments.
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Zone timestamps are shown in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    #[default]
    Local,
    Utc,
}

/// Rows keep arrival order; the chart sorts separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableFormatter {
    zone: DisplayZone,
}

impl TableFormatter {
    pub fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }

    pub fn readings_table(&self, readings: &[Reading]) -> Table {
        if readings.is_empty() {
            return Table::placeholder(READING_COLUMNS.to_vec(), NO_DATA);
        }

        let rows = readings
            .iter()
            .map(|r| TableRow::Cells {
                cells: vec![
                    r.sensor_id.clone(),
                    r.sensor_type.clone(),
                    r.location.clone(),
                    r.value.to_string(),
                    r.unit.clone(),
                    self.format_timestamp(r.timestamp),
                ],
            })
            .collect();
        Table::new(READING_COLUMNS.to_vec(), rows)
    }

    pub fn aggregated_table(&self, readings: &[AggregatedReading]) -> Table {
        if readings.is_empty() {
            return Table::placeholder(AGGREGATED_COLUMNS.to_vec(), NO_AGGREGATED_DATA);
        }

        let rows = readings
            .iter()
            .map(|r| TableRow::Cells {
                cells: vec![
                    r.sensor_id.clone(),
                    r.sensor_type.clone(),
                    r.location.clone(),
                    fixed2(r.min),
                    fixed2(r.mean),
                    fixed2(r.max),
                    r.unit.clone(),
                    self.format_timestamp(r.timestamp),
                ],
            })
            .collect();
        Table::new(AGGREGATED_COLUMNS.to_vec(), rows)
    }

    pub fn format_timestamp(&self, timestamp: DateTime<Utc>) -> String {
        match self.zone {
            DisplayZone::Local => timestamp
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            DisplayZone::Utc => timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

fn fixed2(value: f64) -> String {
    // +0.0 turns -0.0 into 0.0
    format!("{:.2}", value + 0.0)
}
