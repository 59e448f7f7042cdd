// In-memory chart backend - Keeps the live charts that the HTTP layer serves
use crate::application::render_target::{ChartBackend, ChartHandle};
use crate::domain::filter::ViewMode;
use crate::domain::telemetry::ChartData;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
pub struct ChartStore {
    next_id: AtomicU64,
    live: Mutex<HashMap<ChartHandle, (ViewMode, ChartData)>>,
}

impl ChartStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn live(&self) -> MutexGuard<'_, HashMap<ChartHandle, (ViewMode, ChartData)>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of charts currently alive in `slot`.
    pub fn live_count(&self, slot: ViewMode) -> usize {
        self.live().values().filter(|(s, _)| *s == slot).count()
    }

    /// The chart alive in `slot` with its handle.
    pub fn current(&self, slot: ViewMode) -> Option<(ChartHandle, ChartData)> {
        self.live()
            .iter()
            .find(|(_, (s, _))| *s == slot)
            .map(|(handle, (_, chart))| (*handle, chart.clone()))
    }
}

impl ChartBackend for ChartStore {
    fn create(&self, slot: ViewMode, chart: &ChartData) -> ChartHandle {
        let handle = ChartHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.live().insert(handle, (slot, chart.clone()));
        tracing::debug!(slot = %slot, handle = handle.id(), series = chart.series.len(), "Chart created");
        handle
    }

    fn destroy(&self, slot: ViewMode, handle: ChartHandle) {
        if self.live().remove(&handle).is_none() {
            tracing::warn!(slot = %slot, handle = handle.id(), "Destroying unknown chart handle");
        }
    }
}
