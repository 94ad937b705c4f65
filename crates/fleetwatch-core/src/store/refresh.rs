// ── Snapshot application ──
//
// The two write paths into the store: wholesale replacement from the data
// source, and read-modify-write ticks from the live feed. Both publish a
// fresh snapshot; neither mutates a published one.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::DataStore;
use crate::model::{Fleet, Vessel};

impl DataStore {
    /// Replace the whole fleet collection.
    ///
    /// Entities are not merged: a vessel missing from `fleets` disappears.
    /// Every vessel's live series is resized to `live_window`, whatever
    /// window the source delivered it with.
    pub(crate) fn apply_full_refresh(&self, fleets: Vec<Fleet>, live_window: usize) {
        let snapshot: Vec<Arc<Fleet>> = fleets
            .into_iter()
            .map(|fleet| Arc::new(normalize_windows(fleet, live_window)))
            .collect();
        self.fleets.send_replace(Arc::new(snapshot));
        self.last_full_refresh.send_replace(Some(Utc::now()));
    }

    /// Derive the next snapshot from the current one.
    ///
    /// `advance` runs while the channel's write lock is held, so concurrent
    /// writers are serialized and a refresh can never be overwritten by a
    /// tick computed from the snapshot before it.
    pub(crate) fn apply_tick<F>(&self, now: DateTime<Utc>, advance: F)
    where
        F: FnOnce(&[Arc<Fleet>]) -> Vec<Arc<Fleet>>,
    {
        self.fleets.send_modify(|snapshot| {
            let next = advance(snapshot.as_slice());
            *snapshot = Arc::new(next);
        });
        self.last_tick.send_replace(Some(now));
        self.tick_count.send_modify(|count| *count += 1);
    }
}

fn normalize_windows(fleet: Fleet, live_window: usize) -> Fleet {
    let window = live_window.max(1);
    if fleet.vessels().iter().all(|v| v.live.capacity() == window) {
        return fleet;
    }
    let vessels = fleet
        .vessels()
        .iter()
        .map(|vessel| {
            if vessel.live.capacity() == window {
                Arc::clone(vessel)
            } else {
                let mut resized = Vessel::clone(vessel);
                resized.live = vessel.live.resized(window);
                Arc::new(resized)
            }
        })
        .collect();
    fleet.with_vessels(vessels)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ConnectionStatus, VesselId};
    use crate::test_support::{WINDOW, epoch, fleet, vessel};

    fn owned(fleets: Vec<Arc<Fleet>>) -> Vec<Fleet> {
        fleets.into_iter().map(|f| (*f).clone()).collect()
    }

    #[test]
    fn full_refresh_replaces_everything() {
        let store = DataStore::new();
        assert!(store.data_age().is_none());
        store.apply_full_refresh(owned(vec![fleet(
            "North",
            "Oceanic",
            vec![vessel("A", ConnectionStatus::Online, 80)],
        )]), WINDOW);
        assert_eq!(store.vessel_count(), 1);
        assert!(store.last_full_refresh().is_some());
        assert!(store.data_age().unwrap() >= chrono::Duration::zero());

        store.apply_full_refresh(owned(vec![fleet(
            "South",
            "Polar",
            vec![
                vessel("B", ConnectionStatus::Online, 80),
                vessel("C", ConnectionStatus::Offline, 0),
            ],
        )]), WINDOW);
        assert_eq!(store.fleet_count(), 1);
        assert_eq!(store.vessel_count(), 2);
        assert!(store.vessel_by_id(&VesselId::from("vsl-a")).is_none());
        assert!(store.fleet_by_name("South").is_some());
    }

    #[test]
    fn readers_keep_their_snapshot_across_writes() {
        let store = DataStore::new();
        store.apply_full_refresh(owned(vec![fleet(
            "North",
            "Oceanic",
            vec![vessel("A", ConnectionStatus::Online, 80)],
        )]), WINDOW);

        let before = store.fleets_snapshot();
        store.apply_full_refresh(Vec::new(), WINDOW);

        assert_eq!(before.len(), 1);
        assert_eq!(store.fleet_count(), 0);
    }

    #[test]
    fn tick_publishes_new_snapshot_and_counts() {
        let store = DataStore::new();
        store.apply_full_refresh(owned(vec![fleet(
            "North",
            "Oceanic",
            vec![vessel("A", ConnectionStatus::Online, 80)],
        )]), WINDOW);
        let before = store.fleets_snapshot();

        store.apply_tick(epoch(), |fleets| fleets.to_vec());

        assert!(!Arc::ptr_eq(&before, &store.fleets_snapshot()));
        assert_eq!(store.tick_count(), 1);
        assert_eq!(store.last_tick(), Some(epoch()));
    }

    #[test]
    fn full_refresh_resizes_live_windows() {
        let store = DataStore::new();
        store.apply_full_refresh(
            owned(vec![fleet(
                "North",
                "Oceanic",
                vec![vessel("A", ConnectionStatus::Online, 80)],
            )]),
            10,
        );

        let a = store.vessel_by_id(&VesselId::from("vsl-a")).unwrap();
        assert_eq!(a.live.capacity(), 10);
        assert_eq!(a.live.len(), 10);

        store.apply_tick(epoch(), |fleets| fleets.to_vec());
        let a = store.vessel_by_id(&VesselId::from("vsl-a")).unwrap();
        assert_eq!(a.live.len(), 10);
    }
}
