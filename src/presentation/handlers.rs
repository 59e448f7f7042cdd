// HTTP request handlers
use crate::application::dashboard_service::RefreshOutcome;
use crate::domain::catalog::{SelectOption, SensorCatalog};
use crate::domain::dashboard::DashboardView;
use crate::domain::filter::{Filter, TimeRange, ViewMode};
use crate::domain::telemetry::ChartData;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Filter form contents. Empty strings mean "any".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterForm {
    pub sensor_type: Option<String>,
    pub location: Option<String>,
    pub sensor_id: Option<String>,
    pub time_range: Option<String>,
}

/// What the chart canvas of one slot currently shows.
#[derive(Debug, Serialize)]
pub struct ChartView {
    pub handle: u64,
    pub legend: Vec<String>,
    pub chart: ChartData,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub refresh: RefreshOutcome,
    pub view: DashboardView,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_locations(State(state): State<Arc<AppState>>) -> Json<Vec<SelectOption>> {
    Json(state.catalog_service.location_options().await)
}

pub async fn list_sensors(State(state): State<Arc<AppState>>) -> Json<SensorCatalog> {
    Json(state.catalog_service.sensor_catalog().await)
}

pub async fn current_view(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.dashboard_service.snapshot().await)
}

pub async fn live_chart(
    Path(mode): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartView>, ApiError> {
    let mode = mode
        .parse::<ViewMode>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let (handle, chart) = state
        .charts
        .current(mode)
        .ok_or_else(|| ApiError::NotFound(format!("no {mode} chart rendered yet")))?;
    Ok(Json(ChartView {
        handle: handle.id(),
        legend: chart.legend().into_iter().map(str::to_string).collect(),
        chart,
    }))
}

/// Form submit. A bad time range is rejected before any refresh happens.
pub async fn submit_filter(
    State(state): State<Arc<AppState>>,
    Json(form): Json<FilterForm>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let time_range = form
        .time_range
        .ok_or_else(|| ApiError::BadRequest("missing time range".to_string()))?
        .parse::<TimeRange>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let filter = Filter::new(form.sensor_type, form.location, form.sensor_id, time_range);
    let refresh = state.dashboard_service.submit_filter(filter).await;
    Ok(Json(RefreshResponse {
        refresh,
        view: state.dashboard_service.snapshot().await,
    }))
}

/// Tab switch
pub async fn switch_mode(
    Path(mode): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let mode = mode
        .parse::<ViewMode>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let refresh = state.dashboard_service.switch_mode(mode).await;
    Ok(Json(RefreshResponse {
        refresh,
        view: state.dashboard_service.snapshot().await,
    }))
}

/// Sensor list click
pub async fn select_sensor(
    Path(sensor_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let sensor = state
        .catalog_service
        .find_sensor(&sensor_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("unknown sensor `{sensor_id}`")))?;

    let refresh = state.dashboard_service.select_sensor(&sensor).await;
    Ok(Json(RefreshResponse {
        refresh,
        view: state.dashboard_service.snapshot().await,
    }))
}
