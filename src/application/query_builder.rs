// Query builder - Turns a filter and mode into a GraphQL request
use crate::domain::filter::{Filter, ViewMode};
use crate::infrastructure::schema::SchemaNaming;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// Fixed cap on records per readings query.
pub const RESULT_LIMIT: u32 = 100;

const READING_FIELDS: &[&str] = &["sensorId", "sensorType", "location", "value", "unit", "timestamp"];
const AGGREGATED_FIELDS: &[&str] = &[
    "sensorId",
    "sensorType",
    "location",
    "mean",
    "min",
    "max",
    "unit",
    "timestamp",
];

/// A GraphQL POST body plus the root field the response is read from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Map<String, Value>,
    #[serde(skip)]
    pub root_field: String,
}

/// Resolved `[start, end]` window of a readings query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Windows that cannot be represented start at the Unix epoch.
    pub fn ending_at(now: DateTime<Utc>, filter: &Filter, mode: ViewMode) -> Self {
        let hours = i64::from(filter.time_range.hours()) * mode.window_multiplier();
        let start = Duration::try_hours(hours)
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::UNIX_EPOCH);
        Self { start, end: now }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder {
    naming: SchemaNaming,
}

impl QueryBuilder {
    pub fn new(naming: SchemaNaming) -> Self {
        Self { naming }
    }

    pub fn readings(&self, filter: &Filter, mode: ViewMode, now: DateTime<Utc>) -> GraphQlRequest {
        let (root, fields) = match mode {
            ViewMode::Raw => ("sensorReadings", READING_FIELDS),
            ViewMode::Aggregated => ("aggregatedReadings", AGGREGATED_FIELDS),
        };
        let root_field = self.naming.field(root).into_owned();
        let arg = |name: &'static str| self.naming.field(name);

        let selection = fields
            .iter()
            .map(|f| format!("                {}", self.naming.field(f)))
            .collect::<Vec<_>>()
            .join("\n");

        let query = format!(
            "query ($sensorType: String, $location: String, $sensorId: String, $startTime: String, $endTime: String) {{
            {root_field}(
                {}: $sensorType,
                location: $location,
                {}: $sensorId,
                {}: $startTime,
                {}: $endTime,
                limit: {RESULT_LIMIT}
            ) {{
{selection}
            }}
        }}",
            arg("sensorType"),
            arg("sensorId"),
            arg("startTime"),
            arg("endTime"),
        );

        let window = TimeWindow::ending_at(now, filter, mode);
        let variables = json!({
            "sensorType": non_empty(&filter.sensor_type),
            "location": non_empty(&filter.location),
            "sensorId": non_empty(&filter.sensor_id),
            "startTime": iso_timestamp(window.start),
            "endTime": iso_timestamp(window.end),
        });

        GraphQlRequest {
            query,
            variables: into_map(variables),
            root_field,
        }
    }

    pub fn locations(&self) -> GraphQlRequest {
        self.catalog_query("locations", &["name", "sensorCount"])
    }

    pub fn sensors(&self) -> GraphQlRequest {
        self.catalog_query("sensors", &["sensorId", "sensorType", "location"])
    }

    fn catalog_query(&self, root: &str, fields: &[&str]) -> GraphQlRequest {
        let selection = fields
            .iter()
            .map(|f| self.naming.field(f).into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        GraphQlRequest {
            query: format!("query {{ {root} {{ {selection} }} }}"),
            variables: Map::new(),
            root_field: root.to_string(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// `2024-05-01T10:00:00.000Z`
pub fn iso_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::TimeRange;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_filter_fields_become_null() {
        let filter = Filter {
            sensor_type: Some(String::new()),
            location: Some("la".to_string()),
            sensor_id: Some(String::new()),
            time_range: TimeRange::from_hours(24),
        };

        let request = QueryBuilder::default().readings(&filter, ViewMode::Raw, now());

        assert_eq!(
            Value::Object(request.variables),
            json!({
                "sensorType": null,
                "location": "la",
                "sensorId": null,
                "startTime": "2024-05-01T12:00:00.000Z",
                "endTime": "2024-05-02T12:00:00.000Z",
            })
        );
        assert_eq!(request.root_field, "sensorReadings");
    }

    #[test]
    fn test_aggregated_mode_doubles_the_window() {
        let filter = Filter::unfiltered(TimeRange::from_hours(6));
        let request = QueryBuilder::default().readings(&filter, ViewMode::Aggregated, now());

        assert_eq!(request.variables["startTime"], "2024-05-02T00:00:00.000Z");
        assert_eq!(request.variables["endTime"], "2024-05-02T12:00:00.000Z");
        assert_eq!(request.root_field, "aggregatedReadings");
        for field in ["mean", "min", "max", "limit: 100"] {
            assert!(request.query.contains(field), "missing {field}");
        }
        assert!(!request.query.contains("value"));
    }

    #[test]
    fn test_snake_case_schema() {
        let filter = Filter::unfiltered(TimeRange::from_hours(1));
        let request = QueryBuilder::new(SchemaNaming::Snake).readings(&filter, ViewMode::Raw, now());

        assert_eq!(request.root_field, "sensor_readings");
        assert!(request.query.contains("sensor_type: $sensorType"));
        assert!(request.query.contains("start_time: $startTime"));
        assert!(request.query.contains("                sensor_id\n"));
        assert!(!request.query.contains("sensorId\n"));
    }

    #[test]
    fn test_snake_case_aggregated_root() {
        let filter = Filter::unfiltered(TimeRange::from_hours(1));
        let request = QueryBuilder::new(SchemaNaming::Snake).readings(&filter, ViewMode::Aggregated, now());

        assert_eq!(request.root_field, "aggregated_readings");
        assert!(request.query.contains("aggregated_readings("));
        assert!(request.query.contains("                mean\n"));
        assert_eq!(request.variables["startTime"], "2024-05-02T10:00:00.000Z");
    }

    #[test]
    fn test_oversized_window_clamps_instead_of_panicking() {
        let filter = Filter::unfiltered(TimeRange::from_hours(u32::MAX));

        let raw = TimeWindow::ending_at(now(), &filter, ViewMode::Raw);
        let aggregated = TimeWindow::ending_at(now(), &filter, ViewMode::Aggregated);

        assert_eq!(raw.start, DateTime::UNIX_EPOCH);
        assert_eq!(aggregated.start, DateTime::UNIX_EPOCH);
        assert_eq!(aggregated.end, now());

        let request = QueryBuilder::default().readings(&filter, ViewMode::Aggregated, now());
        assert_eq!(request.variables["startTime"], "1970-01-01T00:00:00.000Z");
        assert_eq!(request.variables["endTime"], "2024-05-02T12:00:00.000Z");
    }

    #[test]
    fn test_catalog_queries() {
        let camel = QueryBuilder::default().locations();
        assert_eq!(camel.query, "query { locations { name sensorCount } }");
        assert!(camel.variables.is_empty());

        let snake = QueryBuilder::new(SchemaNaming::Snake).sensors();
        assert_eq!(snake.query, "query { sensors { sensor_id sensor_type location } }");
        assert_eq!(snake.root_field, "sensors");
    }

    #[test]
    fn test_request_body_omits_root_field() {
        let body = serde_json::to_value(QueryBuilder::default().locations()).unwrap();
        assert_eq!(body, json!({ "query": "query { locations { name sensorCount } }", "variables": {} }));
    }
}
