// Chart series domain models
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub x: DateTime<Utc>,
    pub y: f64,
}

impl TimeSeriesPoint {
    pub fn new(x: DateTime<Utc>, y: f64) -> Self {
        Self { x, y }
    }
}

/// What a series plots. Legend and tooltip visibility are decided from this tag,
/// never from the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesRole {
    Value,
    Min,
    Mean,
    Max,
}

impl SeriesRole {
    pub fn in_legend(self) -> bool {
        matches!(self, SeriesRole::Value | SeriesRole::Mean)
    }

    pub fn in_tooltip(self) -> bool {
        self.in_legend()
    }

    pub fn label_suffix(self) -> Option<&'static str> {
        match self {
            SeriesRole::Value => None,
            SeriesRole::Min => Some("Min"),
            SeriesRole::Mean => Some("Mean"),
            SeriesRole::Max => Some("Max"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub width: u8,
    pub dash: Option<[u8; 2]>,
}

impl LineStyle {
    pub const SOLID: LineStyle = LineStyle {
        width: 2,
        dash: None,
    };

    pub const THIN_DASHED: LineStyle = LineStyle {
        width: 1,
        dash: Some([5, 5]),
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesData {
    pub key: String,
    pub sensor_id: String,
    pub label: String,
    pub color: String,
    pub role: SeriesRole,
    pub style: LineStyle,
    pub points: Vec<TimeSeriesPoint>,
}

impl SeriesData {
    pub fn new(
        key: String,
        sensor_id: String,
        label: String,
        color: String,
        role: SeriesRole,
    ) -> Self {
        let style = match role {
            SeriesRole::Min | SeriesRole::Max => LineStyle::THIN_DASHED,
            SeriesRole::Value | SeriesRole::Mean => LineStyle::SOLID,
        };
        Self {
            key,
            sensor_id,
            label,
            color,
            role,
            style,
            points: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minute,
    Hour,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAxis {
    pub unit: TimeUnit,
    pub display_format: &'static str,
    pub tooltip_format: &'static str,
}

impl TimeAxis {
    pub fn minutes() -> Self {
        Self {
            unit: TimeUnit::Minute,
            display_format: "HH:mm",
            tooltip_format: "yyyy-MM-dd HH:mm:ss",
        }
    }

    pub fn hours() -> Self {
        Self {
            unit: TimeUnit::Hour,
            display_format: "MM-dd HH:mm",
            tooltip_format: "yyyy-MM-dd HH:mm:ss",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub title: String,
    pub unit: String,
    pub time_axis: TimeAxis,
    pub series: Vec<SeriesData>,
}

impl ChartData {
    pub fn new(title: String, unit: String, time_axis: TimeAxis, series: Vec<SeriesData>) -> Self {
        Self {
            title,
            unit,
            time_axis,
            series,
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Labels shown in the interactive legend.
    pub fn legend(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|s| s.role.in_legend())
            .map(|s| s.label.as_str())
            .collect()
    }

    /// Tooltip line for one hovered point, or `None` for series kept out of tooltips.
    pub fn tooltip_label(&self, series_idx: usize, point_idx: usize) -> Option<String> {
        let series = self.series.get(series_idx)?;
        if !series.role.in_tooltip() {
            return None;
        }
        let point = series.points.get(point_idx)?;
        let value = match series.role {
            SeriesRole::Value => point.y.to_string(),
            _ => format!("{:.2}", point.y),
        };
        Some(format!("{}: {} {}", series.label, value, self.unit))
    }

    /// `"Range: <min> - <max> <unit>"` for a sensor at a timestamp, when the
    /// chart carries both bands for it.
    pub fn range_footer(&self, sensor_id: &str, at: DateTime<Utc>) -> Option<String> {
        let value_at = |role: SeriesRole| {
            self.series
                .iter()
                .find(|s| s.sensor_id == sensor_id && s.role == role)
                .and_then(|s| s.points.iter().find(|p| p.x == at))
                .map(|p| p.y)
        };

        let min = value_at(SeriesRole::Min)?;
        value_at(SeriesRole::Mean)?;
        let max = value_at(SeriesRole::Max)?;
        Some(format!("Range: {:.2} - {:.2} {}", min, max, self.unit))
    }
}
