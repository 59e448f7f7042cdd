// Render target - Owns at most one live chart handle per slot
use crate::domain::filter::ViewMode;
use crate::domain::telemetry::ChartData;
use std::sync::Arc;

/// Opaque handle to a chart created by a [`ChartBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(u64);

impl ChartHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// The chart renderer. Slots are keyed by the mode they display.
pub trait ChartBackend: Send + Sync {
    fn create(&self, slot: ViewMode, chart: &ChartData) -> ChartHandle;
    fn destroy(&self, slot: ViewMode, handle: ChartHandle);
}

pub struct RenderTarget {
    slot: ViewMode,
    backend: Arc<dyn ChartBackend>,
    active: Option<ChartHandle>,
}

impl RenderTarget {
    pub fn new(slot: ViewMode, backend: Arc<dyn ChartBackend>) -> Self {
        Self {
            slot,
            backend,
            active: None,
        }
    }

    /// Destroys the current chart, then draws `chart` in its place.
    pub fn replace(&mut self, chart: &ChartData) {
        if let Some(previous) = self.active.take() {
            self.backend.destroy(self.slot, previous);
        }
        self.active = Some(self.backend.create(self.slot, chart));
    }

    pub fn active(&self) -> Option<ChartHandle> {
        self.active
    }
}
