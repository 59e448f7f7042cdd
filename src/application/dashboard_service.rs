// Dashboard service - Refresh cycles for the raw and aggregated views
use crate::application::query_builder::QueryBuilder;
use crate::application::render_target::{ChartBackend, RenderTarget};
use crate::application::series_builder::SeriesBuilder;
use crate::application::table_formatter::TableFormatter;
use crate::application::telemetry_repository::{RepositoryError, TelemetryRepository};
use crate::domain::dashboard::{DashboardView, PanelView};
use crate::domain::filter::{Filter, ViewMode};
use crate::domain::reading::SensorInfo;
use crate::domain::table::Table;
use crate::domain::telemetry::ChartData;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Initial,
    FilterSubmit,
    ModeSwitch,
    Timer,
    SensorSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum RefreshOutcome {
    Applied { token: u64 },
    /// A newer refresh was issued while this one was in flight.
    Stale { token: u64, latest: u64 },
    /// Transport failure; the previous view stays on screen.
    Failed { token: u64 },
}

struct Panel {
    target: RenderTarget,
    chart: Option<ChartData>,
    table: Option<Table>,
}

impl Panel {
    fn new(slot: ViewMode, backend: Arc<dyn ChartBackend>) -> Self {
        Self {
            target: RenderTarget::new(slot, backend),
            chart: None,
            table: None,
        }
    }

    fn render(&mut self, chart: ChartData, table: Table) {
        self.target.replace(&chart);
        self.chart = Some(chart);
        self.table = Some(table);
    }

    fn view(&self) -> PanelView {
        PanelView {
            chart: self.chart.clone(),
            table: self.table.clone(),
        }
    }
}

struct ViewState {
    mode: ViewMode,
    filter: Filter,
    raw: Panel,
    aggregated: Panel,
    applied_token: u64,
}

impl ViewState {
    fn panel_mut(&mut self, mode: ViewMode) -> &mut Panel {
        match mode {
            ViewMode::Raw => &mut self.raw,
            ViewMode::Aggregated => &mut self.aggregated,
        }
    }
}

/// Fetch and shaping result for one refresh, ready to render.
struct Rendered {
    chart: ChartData,
    table: Table,
    records: usize,
}

pub struct DashboardService {
    repository: Arc<dyn TelemetryRepository>,
    queries: QueryBuilder,
    series: SeriesBuilder,
    tables: TableFormatter,
    latest_token: AtomicU64,
    state: Mutex<ViewState>,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn TelemetryRepository>,
        queries: QueryBuilder,
        series: SeriesBuilder,
        tables: TableFormatter,
        backend: Arc<dyn ChartBackend>,
        filter: Filter,
    ) -> Self {
        Self {
            repository,
            queries,
            series,
            tables,
            latest_token: AtomicU64::new(0),
            state: Mutex::new(ViewState {
                mode: ViewMode::Raw,
                filter,
                raw: Panel::new(ViewMode::Raw, backend.clone()),
                aggregated: Panel::new(ViewMode::Aggregated, backend),
                applied_token: 0,
            }),
        }
    }

    /// One query -> fetch -> shape -> render pass for the active mode.
    ///
    /// Every call takes a fresh token before fetching. The response is only
    /// rendered if no later refresh has been issued by the time it arrives.
    pub async fn refresh(&self, trigger: RefreshTrigger) -> RefreshOutcome {
        let (token, mode, filter) = {
            let state = self.state.lock().await;
            let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
            (token, state.mode, state.filter.clone())
        };

        tracing::debug!(token, mode = %mode, ?trigger, "Starting refresh");

        let rendered = match self.fetch(&filter, mode).await {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::error!(token, mode = %mode, error = %e, "Refresh failed, keeping previous view");
                return RefreshOutcome::Failed { token };
            }
        };

        let mut state = self.state.lock().await;
        let latest = self.latest_token.load(Ordering::SeqCst);
        if token != latest {
            tracing::debug!(token, latest, mode = %mode, "Discarding stale response");
            return RefreshOutcome::Stale { token, latest };
        }

        state
            .panel_mut(mode)
            .render(rendered.chart, rendered.table);
        state.applied_token = token;

        tracing::debug!(token, mode = %mode, records = rendered.records, "Refresh applied");
        RefreshOutcome::Applied { token }
    }

    async fn fetch(&self, filter: &Filter, mode: ViewMode) -> Result<Rendered, RepositoryError> {
        let request = self.queries.readings(filter, mode, Utc::now());
        let rendered = match mode {
            ViewMode::Raw => {
                let readings = self.repository.sensor_readings(&request).await?;
                Rendered {
                    chart: self.series.raw_chart(&readings),
                    table: self.tables.readings_table(&readings),
                    records: readings.len(),
                }
            }
            ViewMode::Aggregated => {
                let readings = self.repository.aggregated_readings(&request).await?;
                Rendered {
                    chart: self.series.aggregated_chart(&readings),
                    table: self.tables.aggregated_table(&readings),
                    records: readings.len(),
                }
            }
        };
        Ok(rendered)
    }

    pub async fn submit_filter(&self, filter: Filter) -> RefreshOutcome {
        self.state.lock().await.filter = filter;
        self.refresh(RefreshTrigger::FilterSubmit).await
    }

    /// Tab switch. Any response still in flight for the old mode is discarded.
    pub async fn switch_mode(&self, mode: ViewMode) -> RefreshOutcome {
        self.state.lock().await.mode = mode;
        tracing::info!(mode = %mode, "Switched view mode");
        self.refresh(RefreshTrigger::ModeSwitch).await
    }

    /// Clicking a sensor in the catalog narrows the filter to it.
    pub async fn select_sensor(&self, sensor: &SensorInfo) -> RefreshOutcome {
        {
            let mut state = self.state.lock().await;
            let time_range = state.filter.time_range;
            state.filter = Filter::new(
                Some(sensor.sensor_type.clone()),
                Some(sensor.location.clone()),
                Some(sensor.sensor_id.clone()),
                time_range,
            );
        }
        self.refresh(RefreshTrigger::SensorSelected).await
    }

    pub async fn snapshot(&self) -> DashboardView {
        let state = self.state.lock().await;
        DashboardView {
            mode: state.mode,
            filter: state.filter.clone(),
            raw: state.raw.view(),
            aggregated: state.aggregated.view(),
            applied_token: state.applied_token,
        }
    }

    /// Refreshes the active mode every `period` until the process exits.
    pub async fn run_timer(self: Arc<Self>, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick completes immediately; the initial load is its own trigger.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.refresh(RefreshTrigger::Timer).await;
        }
    }
}
