// Application state for HTTP handlers
use crate::application::catalog_service::CatalogService;
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::chart_store::ChartStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: CatalogService,
    pub dashboard_service: Arc<DashboardService>,
    pub charts: Arc<ChartStore>,
}
