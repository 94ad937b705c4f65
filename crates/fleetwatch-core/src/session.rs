// ── Monitoring session ──
//
// A session is the explicit context for one dashboard: it owns the store,
// the current query criteria and the background tasks that keep the store
// moving. Nothing is global; two sessions never share state.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::export::{self, ExportFormat};
use crate::live::{FeedControl, live_feed_task, tick};
use crate::metrics::{Aggregates, Insight, compute_aggregates, distinct_clients, generate_insights};
use crate::model::{Fleet, Vessel, VesselId};
use crate::query::{
    FleetView, NameFilter, QueryCriteria, SignalFilter, SortKey, StatusFilter, compute_view,
};
use crate::source::{FleetSource, MockFleetSource};
use crate::store::DataStore;
use crate::stream::EntityStream;

/// Mixed into the configured seed so the session's own generator does not
/// replay the mock source's sequence.
const SESSION_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Closed,
}

/// One operator's view of the fleet.
///
/// Create with [`Session::new`], then call [`start()`](Self::start) from
/// inside a Tokio runtime to load the first snapshot and spawn the live
/// feed. Criteria setters recompute nothing eagerly: every read derives its
/// result from the latest snapshot.
pub struct Session {
    config: EngineConfig,
    source: Arc<dyn FleetSource>,
    store: Arc<DataStore>,
    criteria: QueryCriteria,
    feed: FeedControl,
    cancel: CancellationToken,
    task_handles: Vec<JoinHandle<()>>,
    rng: StdRng,
    lifecycle: Lifecycle,
}

impl Session {
    pub fn new<S>(config: EngineConfig, source: S) -> Self
    where
        S: FleetSource + 'static,
    {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ SESSION_SEED_SALT),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            source: Arc::new(source),
            store: Arc::new(DataStore::new()),
            criteria: QueryCriteria::default(),
            feed: FeedControl::new(),
            cancel: CancellationToken::new(),
            task_handles: Vec::new(),
            rng,
            lifecycle: Lifecycle::Idle,
        }
    }

    /// A session backed by [`MockFleetSource`] built from the same config.
    pub fn with_mock(config: EngineConfig) -> Self {
        let source = MockFleetSource::new(&config);
        Self::new(config, source)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.store
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Load the first snapshot and spawn the background tasks.
    ///
    /// Calling `start` on a running session is a no-op. If the initial
    /// load fails nothing is spawned and the session stays startable.
    pub async fn start(&mut self) -> Result<(), CoreError> {
        match self.lifecycle {
            Lifecycle::Closed => return Err(CoreError::SessionClosed),
            Lifecycle::Running => {
                debug!("session already started");
                return Ok(());
            }
            Lifecycle::Idle => {}
        }

        let vessels = reload(self.source.as_ref(), &self.store, self.config.live_window)?;

        let feed_rng = StdRng::seed_from_u64(self.rng.next_u64());
        self.task_handles.push(tokio::spawn(live_feed_task(
            Arc::clone(&self.store),
            self.config.tick_interval,
            self.config.jitter,
            feed_rng,
            self.feed.subscribe(),
            self.cancel.child_token(),
        )));

        let interval_secs = self.config.refresh_interval_secs;
        if interval_secs > 0 {
            self.task_handles.push(tokio::spawn(refresh_task(
                Arc::clone(&self.store),
                Arc::clone(&self.source),
                interval_secs,
                self.config.live_window,
                self.cancel.child_token(),
            )));
        }

        self.lifecycle = Lifecycle::Running;
        info!(
            vessels,
            tick_ms = self.config.tick_interval.as_millis(),
            refresh_secs = interval_secs,
            "session started"
        );
        Ok(())
    }

    /// Replace the whole collection from the data source.
    ///
    /// Returns the number of vessels loaded.
    pub fn refresh(&self) -> Result<usize, CoreError> {
        self.ensure_open()?;
        reload(self.source.as_ref(), &self.store, self.config.live_window)
    }

    /// Cancel every background task and wait for them to finish.
    ///
    /// After shutdown no task applies further updates and every mutating
    /// call returns [`CoreError::SessionClosed`]. Reads keep serving the
    /// last snapshot.
    pub async fn shutdown(&mut self) {
        if self.lifecycle == Lifecycle::Closed {
            return;
        }
        self.cancel.cancel();
        for handle in self.task_handles.drain(..) {
            if let Err(e) = handle.await {
                warn!(error = %e, "background task ended abnormally");
            }
        }
        self.lifecycle = Lifecycle::Closed;
        info!(ticks = self.store.tick_count(), "session shut down");
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    fn ensure_open(&self) -> Result<(), CoreError> {
        if self.lifecycle == Lifecycle::Closed {
            Err(CoreError::SessionClosed)
        } else {
            Ok(())
        }
    }

    // ── Criteria ─────────────────────────────────────────────────────

    pub fn criteria(&self) -> &QueryCriteria {
        &self.criteria
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.criteria.search = term.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.criteria.status = status;
    }

    pub fn set_signal_filter(&mut self, signal: SignalFilter) {
        self.criteria.signal = signal;
    }

    /// Select a client scope. Returns `true` if the fleet selection was
    /// reset as a consequence.
    pub fn set_client_filter(&mut self, client: NameFilter) -> bool {
        let reset = self.criteria.set_client(client);
        if reset {
            debug!("client scope changed, fleet filter reset");
        }
        reset
    }

    pub fn set_fleet_filter(&mut self, fleet: NameFilter) {
        self.criteria.set_fleet(fleet);
    }

    /// Sort by `key`, flipping direction if it is already the active key.
    pub fn set_sort(&mut self, key: SortKey) {
        self.criteria.toggle_sort(key);
    }

    pub fn reset_criteria(&mut self) {
        self.criteria = QueryCriteria::default();
    }

    // ── Derived reads ────────────────────────────────────────────────

    /// The filtered, sorted vessel list plus selector options.
    pub fn view(&self) -> FleetView {
        compute_view(&self.store.vessels_snapshot(), &self.criteria)
    }

    /// Dashboard figures over the whole collection, ignoring filters.
    pub fn aggregates(&self) -> Aggregates {
        let vessels = self.store.vessels_snapshot();
        compute_aggregates(vessels.iter().map(Arc::as_ref))
    }

    pub fn insights(&self) -> Vec<Insight> {
        let vessels = self.store.vessels_snapshot();
        let aggregates = compute_aggregates(vessels.iter().map(Arc::as_ref));
        let clients = distinct_clients(vessels.iter().map(Arc::as_ref));
        generate_insights(&aggregates, clients, &self.config.insights)
    }

    /// Vessels currently raising an alert: offline ones first, then by
    /// ascending signal strength.
    pub fn alerts(&self) -> Vec<Arc<Vessel>> {
        let mut alerting: Vec<Arc<Vessel>> = self
            .store
            .vessels_snapshot()
            .into_iter()
            .filter(|v| v.alert())
            .collect();
        alerting.sort_by_key(|v| (v.is_online(), v.signal_strength));
        alerting
    }

    pub fn vessel(&self, id: &VesselId) -> Result<Arc<Vessel>, CoreError> {
        self.store
            .vessel_by_id(id)
            .ok_or_else(|| CoreError::VesselNotFound {
                identifier: id.to_string(),
            })
    }

    pub fn fleets(&self) -> Arc<Vec<Arc<Fleet>>> {
        self.store.fleets_snapshot()
    }

    /// Subscribe to snapshot changes (refreshes and ticks).
    pub fn subscribe(&self) -> EntityStream<Fleet> {
        self.store.subscribe_fleets()
    }

    // ── Export ───────────────────────────────────────────────────────

    /// The current view as CSV text.
    pub fn export_csv(&self) -> Result<String, CoreError> {
        export::to_csv(&export::export_rows(&self.view().vessels))
    }

    pub fn export(&self, format: ExportFormat) -> Result<String, CoreError> {
        export::render(&self.view().vessels, format)
    }

    pub fn export_to<W: Write>(&self, format: ExportFormat, writer: W) -> Result<(), CoreError> {
        export::write_export(&self.view().vessels, format, writer)
    }

    // ── Live feed control ────────────────────────────────────────────

    /// Suspend live ticks. Returns `true` if the feed was running.
    pub fn pause(&self) -> bool {
        let changed = self.feed.set_paused(true);
        if changed {
            info!("live feed paused");
        }
        changed
    }

    /// Resume live ticks. Returns `true` if the feed was paused.
    pub fn resume(&self) -> bool {
        let changed = self.feed.set_paused(false);
        if changed {
            info!("live feed resumed");
        }
        changed
    }

    pub fn is_paused(&self) -> bool {
        self.feed.is_paused()
    }

    /// Apply one tick immediately, independent of the timer and of the
    /// pause switch.
    pub fn tick_now(&mut self) -> Result<(), CoreError> {
        self.ensure_open()?;
        let now = Utc::now();
        let jitter = self.config.jitter;
        let rng = &mut self.rng;
        self.store
            .apply_tick(now, |fleets| tick(fleets, &jitter, now, rng));
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn reload(
    source: &dyn FleetSource,
    store: &DataStore,
    live_window: usize,
) -> Result<usize, CoreError> {
    let fleets = source.load()?;
    store.apply_full_refresh(fleets, live_window);
    let vessels = store.vessel_count();
    debug!(fleets = store.fleet_count(), vessels, "full refresh applied");
    Ok(vessels)
}

/// Periodically reload the collection from the source.
async fn refresh_task(
    store: Arc<DataStore>,
    source: Arc<dyn FleetSource>,
    interval_secs: u64,
    live_window: usize,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = reload(source.as_ref(), &store, live_window) {
                    warn!(error = %e, "periodic refresh failed");
                }
            }
        }
    }
}
