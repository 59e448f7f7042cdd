// Filter and view mode domain models
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Raw,
    Aggregated,
}

impl ViewMode {
    /// Aggregated views look back twice as far as the selected range.
    pub fn window_multiplier(self) -> i64 {
        match self {
            ViewMode::Raw => 1,
            ViewMode::Aggregated => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Raw => "raw",
            ViewMode::Aggregated => "aggregated",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(ViewMode::Raw),
            "aggregated" => Ok(ViewMode::Aggregated),
            other => Err(UnknownViewMode(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown view mode `{0}`")]
pub struct UnknownViewMode(pub String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimeRangeError {
    #[error("malformed time range `{0}`, expected `<hours>h`")]
    Malformed(String),

    #[error("time range `{0}` exceeds the 87600h limit")]
    TooLong(String),
}

/// Ten years.
pub const MAX_HOURS: u32 = 87_600;

/// Look-back window in whole hours, written as `"<n>h"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct TimeRange {
    hours: u32,
}

impl TimeRange {
    pub fn from_hours(hours: u32) -> Self {
        Self { hours }
    }

    pub fn hours(self) -> u32 {
        self.hours
    }
}

impl FromStr for TimeRange {
    type Err = TimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('h').unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeRangeError::Malformed(s.to_string()));
        }

        match digits.parse::<u32>() {
            Ok(hours) if hours <= MAX_HOURS => Ok(Self::from_hours(hours)),
            _ => Err(TimeRangeError::TooLong(s.to_string())),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.hours)
    }
}

impl From<TimeRange> for String {
    fn from(range: TimeRange) -> Self {
        range.to_string()
    }
}

/// Current filter selection. Empty strings mean "no filter" and are stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub sensor_type: Option<String>,
    pub location: Option<String>,
    pub sensor_id: Option<String>,
    pub time_range: TimeRange,
}

impl Filter {
    pub fn new(
        sensor_type: Option<String>,
        location: Option<String>,
        sensor_id: Option<String>,
        time_range: TimeRange,
    ) -> Self {
        Self {
            sensor_type: non_empty(sensor_type),
            location: non_empty(location),
            sensor_id: non_empty(sensor_id),
            time_range,
        }
    }

    pub fn unfiltered(time_range: TimeRange) -> Self {
        Self::new(None, None, None, time_range)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_range() {
        assert_eq!("24h".parse::<TimeRange>().unwrap().hours(), 24);
        assert_eq!("1h".parse::<TimeRange>().unwrap().hours(), 1);
        assert_eq!("168".parse::<TimeRange>().unwrap().hours(), 168);
    }

    #[test]
    fn test_malformed_time_range_is_rejected() {
        for bad in ["", "h", "abc", "-3h", "+24h", "+24", "1.5h", "24m", "2 4h"] {
            assert_eq!(
                bad.parse::<TimeRange>(),
                Err(TimeRangeError::Malformed(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_time_range_upper_bound() {
        assert_eq!("87600h".parse::<TimeRange>().unwrap().hours(), MAX_HOURS);
        for bad in ["87601h", "1500000000h", "3000000000h", "99999999999999999999h"] {
            assert_eq!(
                bad.parse::<TimeRange>(),
                Err(TimeRangeError::TooLong(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_filter_drops_empty_strings() {
        let filter = Filter::new(
            Some(String::new()),
            Some("la".to_string()),
            Some(String::new()),
            TimeRange::from_hours(24),
        );

        assert_eq!(filter.sensor_type, None);
        assert_eq!(filter.location.as_deref(), Some("la"));
        assert_eq!(filter.sensor_id, None);
    }

    #[test]
    fn test_view_mode_round_trip_names() {
        assert_eq!("raw".parse::<ViewMode>().unwrap(), ViewMode::Raw);
        assert_eq!("aggregated".parse::<ViewMode>().unwrap(), ViewMode::Aggregated);
        assert!("both".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Aggregated.window_multiplier(), 2);
    }
}
