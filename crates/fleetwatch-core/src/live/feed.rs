// ── Live feed background task ──
//
// Applies one tick per interval until cancelled. Pausing suppresses ticks
// without stopping the timer, so resuming picks up on the next boundary.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::tick::tick;
use crate::config::JitterConfig;
use crate::store::DataStore;

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Pause switch shared between a session and its feed task.
pub(crate) struct FeedControl {
    paused: watch::Sender<bool>,
}

impl FeedControl {
    pub(crate) fn new() -> Self {
        let (paused, _) = watch::channel(false);
        Self { paused }
    }

    /// Returns `true` if the state changed.
    pub(crate) fn set_paused(&self, paused: bool) -> bool {
        self.paused.send_if_modified(|current| {
            if *current == paused {
                false
            } else {
                *current = paused;
                true
            }
        })
    }

    pub(crate) fn is_paused(&self) -> bool {
        *self.paused.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.paused.subscribe()
    }
}

/// Drive the simulated feed for one session.
pub(crate) async fn live_feed_task(
    store: Arc<DataStore>,
    period: Duration,
    jitter: JitterConfig,
    mut rng: StdRng,
    paused: watch::Receiver<bool>,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(period.max(MIN_TICK_INTERVAL));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval.tick().await; // consume the immediate first tick

    debug!(period_ms = period.as_millis(), "live feed started");
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if *paused.borrow() {
                    continue;
                }
                let now = Utc::now();
                store.apply_tick(now, |fleets| tick(fleets, &jitter, now, &mut rng));
                trace!(tick = store.tick_count(), "live tick applied");
            }
        }
    }
    debug!(ticks = store.tick_count(), "live feed stopped");
}
