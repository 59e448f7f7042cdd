// Presentation layer - HTTP surface
pub mod app_state;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    current_view, health_check, list_locations, list_sensors, live_chart, select_sensor,
    submit_filter, switch_mode,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/locations", get(list_locations))
        .route("/api/sensors", get(list_sensors))
        .route("/api/sensors/:id/select", post(select_sensor))
        .route("/api/view", get(current_view))
        .route("/api/charts/:mode", get(live_chart))
        .route("/api/filter", post(submit_filter))
        .route("/api/mode/:mode", post(switch_mode))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
