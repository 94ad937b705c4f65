// ── Central snapshot store ──
//
// Holds the current fleet collection as a single `Arc` snapshot. Writers
// replace the snapshot wholesale; readers clone the `Arc` and never see a
// partially applied refresh or tick.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::model::{Fleet, Vessel, VesselId};
use crate::stream::EntityStream;

pub(crate) type FleetSnapshot = Arc<Vec<Arc<Fleet>>>;

/// Reactive store for the fleet collection of one session.
pub struct DataStore {
    pub(crate) fleets: watch::Sender<FleetSnapshot>,
    pub(crate) last_full_refresh: watch::Sender<Option<DateTime<Utc>>>,
    pub(crate) last_tick: watch::Sender<Option<DateTime<Utc>>>,
    pub(crate) tick_count: watch::Sender<u64>,
}

impl DataStore {
    pub fn new() -> Self {
        let (fleets, _) = watch::channel(Arc::new(Vec::new()));
        let (last_full_refresh, _) = watch::channel(None);
        let (last_tick, _) = watch::channel(None);
        let (tick_count, _) = watch::channel(0);

        Self {
            fleets,
            last_full_refresh,
            last_tick,
            tick_count,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn fleets_snapshot(&self) -> Arc<Vec<Arc<Fleet>>> {
        self.fleets.borrow().clone()
    }

    /// Every vessel across all fleets, in fleet order.
    pub fn vessels_snapshot(&self) -> Vec<Arc<Vessel>> {
        flatten(&self.fleets_snapshot())
    }

    // ── Single-entity lookups ────────────────────────────────────────

    pub fn vessel_by_id(&self, id: &VesselId) -> Option<Arc<Vessel>> {
        self.fleets
            .borrow()
            .iter()
            .flat_map(|f| f.vessels().iter())
            .find(|v| &v.id == id)
            .cloned()
    }

    pub fn fleet_by_name(&self, name: &str) -> Option<Arc<Fleet>> {
        self.fleets
            .borrow()
            .iter()
            .find(|f| f.name() == name)
            .cloned()
    }

    // ── Count accessors ──────────────────────────────────────────────

    pub fn fleet_count(&self) -> usize {
        self.fleets.borrow().len()
    }

    pub fn vessel_count(&self) -> usize {
        self.fleets.borrow().iter().map(|f| f.vessels().len()).sum()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_fleets(&self) -> EntityStream<Fleet> {
        EntityStream::new(self.fleets.subscribe())
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_full_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_full_refresh.borrow()
    }

    pub fn last_tick(&self) -> Option<DateTime<Utc>> {
        *self.last_tick.borrow()
    }

    /// Number of live-feed ticks applied since the store was created.
    pub fn tick_count(&self) -> u64 {
        *self.tick_count.borrow()
    }

    /// How long ago the last full refresh occurred, or `None` if never refreshed.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_full_refresh().map(|t| Utc::now() - t)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn flatten(fleets: &[Arc<Fleet>]) -> Vec<Arc<Vessel>> {
    fleets
        .iter()
        .flat_map(|f| f.vessels().iter().cloned())
        .collect()
}
