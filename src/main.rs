// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::catalog_service::CatalogService;
use crate::application::dashboard_service::{DashboardService, RefreshTrigger};
use crate::application::query_builder::QueryBuilder;
use crate::application::series_builder::SeriesBuilder;
use crate::application::table_formatter::TableFormatter;
use crate::domain::filter::Filter;
use crate::infrastructure::chart_store::ChartStore;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::graphql_repository::GraphQlRepository;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,sensor_dashboard=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let time_range = config
        .refresh
        .time_range()
        .context("invalid refresh.default_time_range")?;
    tracing::info!(
        graphql = %config.graphql.url,
        naming = ?config.graphql.naming,
        interval_secs = config.refresh.interval_secs,
        "Configuration loaded"
    );

    // Create repository (infrastructure layer)
    let repository = Arc::new(
        GraphQlRepository::new(config.graphql.url.clone(), config.graphql.timeout())
            .context("failed to build HTTP client")?,
    );
    let charts = Arc::new(ChartStore::new());

    // Create services (application layer)
    let queries = QueryBuilder::new(config.graphql.naming);
    let catalog_service = CatalogService::new(repository.clone(), queries);
    let dashboard_service = Arc::new(DashboardService::new(
        repository,
        queries,
        SeriesBuilder::new(config.display.colors),
        TableFormatter::new(config.display.zone),
        charts.clone(),
        Filter::unfiltered(time_range),
    ));

    // Initial load, then the periodic refresh for the life of the process
    tokio::spawn({
        let service = dashboard_service.clone();
        async move {
            service.refresh(RefreshTrigger::Initial).await;
        }
    });
    tokio::spawn(dashboard_service.clone().run_timer(config.refresh.interval()));

    // Create application state
    let state = Arc::new(AppState {
        catalog_service,
        dashboard_service,
        charts,
    });

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    tracing::info!(address = %config.server.bind, "Starting sensor-dashboard");

    axum::serve(listener, presentation::router(state)).await?;

    Ok(())
}
