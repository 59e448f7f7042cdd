use crate::application::series_builder::ColorMode;
use crate::application::table_formatter::DisplayZone;
use crate::domain::filter::{TimeRange, TimeRangeError};
use crate::infrastructure::schema::SchemaNaming;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub graphql: GraphQlSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphQlSettings {
    #[serde(default = "default_graphql_url")]
    pub url: String,
    #[serde(default)]
    pub naming: SchemaNaming,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_time_range")]
    pub default_time_range: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplaySettings {
    #[serde(default)]
    pub colors: ColorMode,
    #[serde(default)]
    pub zone: DisplayZone,
}

fn default_graphql_url() -> String {
    "http://localhost:8000/graphql".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_interval_secs() -> u64 {
    30
}

fn default_time_range() -> String {
    "1h".to_string()
}

impl Default for GraphQlSettings {
    fn default() -> Self {
        Self {
            url: default_graphql_url(),
            naming: SchemaNaming::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            default_time_range: default_time_range(),
        }
    }
}

impl GraphQlSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RefreshSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// A malformed range is a configuration error, never coerced.
    pub fn time_range(&self) -> Result<TimeRange, TimeRangeError> {
        self.default_time_range.parse()
    }
}

/// Loads `config/dashboard.*` (optional) with `DASHBOARD__*` environment overrides,
/// e.g. `DASHBOARD__GRAPHQL__URL`.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse(toml: &str) -> DashboardConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.graphql.url, "http://localhost:8000/graphql");
        assert_eq!(config.graphql.naming, SchemaNaming::Camel);
        assert_eq!(config.refresh.interval(), Duration::from_secs(30));
        assert_eq!(config.refresh.time_range().unwrap().hours(), 1);
        assert_eq!(config.display.colors, ColorMode::Random);
        assert_eq!(config.display.zone, DisplayZone::Local);
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = parse(
            r#"
            [graphql]
            url = "http://historian:8000/graphql"
            naming = "snake"

            [refresh]
            interval_secs = 5
            default_time_range = "24h"

            [display]
            colors = "stable"
            zone = "utc"
            "#,
        );
        assert_eq!(config.graphql.naming, SchemaNaming::Snake);
        assert_eq!(config.graphql.timeout(), Duration::from_secs(10));
        assert_eq!(config.refresh.interval_secs, 5);
        assert_eq!(config.refresh.time_range().unwrap().hours(), 24);
        assert_eq!(config.display.colors, ColorMode::Stable);
        assert_eq!(config.display.zone, DisplayZone::Utc);
    }

    #[test]
    fn test_malformed_time_range_is_rejected() {
        let config = parse(
            r#"
            [refresh]
            default_time_range = "a day"
            "#,
        );
        assert!(config.refresh.time_range().is_err());
    }

    #[test]
    fn test_oversized_time_range_is_rejected() {
        let config = parse(
            r#"
            [refresh]
            default_time_range = "1500000000h"
            "#,
        );
        assert_eq!(
            config.refresh.time_range(),
            Err(TimeRangeError::TooLong("1500000000h".to_string()))
        );
    }
}
