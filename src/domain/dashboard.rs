// Dashboard view domain model
use super::filter::{Filter, ViewMode};
use super::table::Table;
use super::telemetry::ChartData;
use serde::Serialize;

/// What one mode's panel currently shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelView {
    pub chart: Option<ChartData>,
    pub table: Option<Table>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub mode: ViewMode,
    pub filter: Filter,
    pub raw: PanelView,
    pub aggregated: PanelView,
    /// Refresh token of the last response that was rendered, 0 before the first one.
    pub applied_token: u64,
}
