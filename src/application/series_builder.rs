// Series builder - Groups flat readings into per-sensor chart series
use crate::domain::catalog::capitalize;
use crate::domain::reading::{AggregatedReading, Reading, Record};
use crate::domain::telemetry::{ChartData, SeriesData, SeriesRole, TimeAxis, TimeSeriesPoint};
use serde::Deserialize;
use std::collections::HashMap;

pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// How series colors are chosen from [`PALETTE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Uniform random pick on every render.
    #[default]
    Random,
    /// Same series key, same color.
    Stable,
}

impl ColorMode {
    pub fn pick(self, key: &str) -> &'static str {
        let idx = match self {
            ColorMode::Random => fastrand::usize(..PALETTE.len()),
            ColorMode::Stable => (fnv1a(key.as_bytes()) % PALETTE.len() as u64) as usize,
        };
        PALETTE[idx]
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesBuilder {
    colors: ColorMode,
}

impl SeriesBuilder {
    pub fn new(colors: ColorMode) -> Self {
        Self { colors }
    }

    /// One series per sensor, labeled `"<sensorId> (<location>)"`.
    pub fn raw_chart(&self, readings: &[Reading]) -> ChartData {
        let sorted = sorted_by_time(readings);
        let mut series: Vec<SeriesData> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for reading in &sorted {
            let idx = *index.entry(reading.sensor_id.as_str()).or_insert_with(|| {
                series.push(SeriesData::new(
                    reading.sensor_id.clone(),
                    reading.sensor_id.clone(),
                    format!("{} ({})", reading.sensor_id, reading.location),
                    self.colors.pick(&reading.sensor_id).to_string(),
                    SeriesRole::Value,
                ));
                series.len() - 1
            });
            series[idx]
                .points
                .push(TimeSeriesPoint::new(reading.timestamp, reading.value));
        }

        let (title, unit) = title_and_unit(&sorted);
        ChartData::new(title, unit, TimeAxis::minutes(), series)
    }

    /// Three series per sensor (min, mean, max) sharing one color.
    pub fn aggregated_chart(&self, readings: &[AggregatedReading]) -> ChartData {
        const ROLES: [SeriesRole; 3] = [SeriesRole::Min, SeriesRole::Mean, SeriesRole::Max];

        let sorted = sorted_by_time(readings);
        let mut series: Vec<SeriesData> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for reading in &sorted {
            let sensor_id = reading.sensor_id.as_str();
            let first = *index.entry(sensor_id).or_insert_with(|| {
                let color = self.colors.pick(sensor_id);
                let first = series.len();
                for role in ROLES {
                    let suffix = role.label_suffix().unwrap_or_default();
                    series.push(SeriesData::new(
                        format!("{}-{}", sensor_id, suffix.to_lowercase()),
                        sensor_id.to_string(),
                        format!("{} ({})", sensor_id, suffix),
                        color.to_string(),
                        role,
                    ));
                }
                first
            });

            let values = [reading.min, reading.mean, reading.max];
            for (offset, value) in values.into_iter().enumerate() {
                series[first + offset]
                    .points
                    .push(TimeSeriesPoint::new(reading.timestamp, value));
            }
        }

        let (title, unit) = title_and_unit(&sorted);
        ChartData::new(format!("Aggregated {title}"), unit, TimeAxis::hours(), series)
    }
}

/// Stable sort by ascending timestamp; ties keep arrival order.
fn sorted_by_time<R: Record>(records: &[R]) -> Vec<&R> {
    let mut sorted: Vec<&R> = records.iter().collect();
    sorted.sort_by_key(|r| r.timestamp());
    sorted
}

/// Title and axis unit come from the earliest record.
fn title_and_unit<R: Record>(sorted: &[&R]) -> (String, String) {
    let (sensor_type, unit) = sorted
        .first()
        .map(|r| (r.sensor_type(), r.unit()))
        .unwrap_or(("Sensor", ""));

    let title = if unit.is_empty() {
        format!("{} Data", capitalize(sensor_type))
    } else {
        format!("{} Data ({})", capitalize(sensor_type), unit)
    };
    (title, unit.to_string())
}
