// ── Live tick ──
//
// One step of the simulated feed. Online vessels take a bounded random
// step on each live metric and push the result into their window; offline
// vessels are carried over untouched (same `Arc`). Fleets without online
// vessels are carried over as well.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::config::JitterConfig;
use crate::model::vessel::clamp_signal;
use crate::model::{Fleet, LiveSample, Vessel};

/// Advance every online vessel by one sample.
pub fn tick<R: Rng + ?Sized>(
    fleets: &[Arc<Fleet>],
    jitter: &JitterConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Arc<Fleet>> {
    fleets
        .iter()
        .map(|fleet| {
            if !fleet.vessels().iter().any(|v| v.is_online()) {
                return Arc::clone(fleet);
            }
            let vessels = fleet
                .vessels()
                .iter()
                .map(|vessel| {
                    if vessel.is_online() {
                        Arc::new(advance_vessel(vessel, jitter, now, rng))
                    } else {
                        Arc::clone(vessel)
                    }
                })
                .collect();
            Arc::new(fleet.with_vessels(vessels))
        })
        .collect()
}

/// The next state of a single online vessel.
pub fn advance_vessel<R: Rng + ?Sized>(
    vessel: &Vessel,
    jitter: &JitterConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vessel {
    let spread = i32::from(jitter.signal);
    let signal_strength = clamp_signal(i32::from(vessel.signal_strength) + rng.gen_range(-spread..=spread));
    let download_mbps = step(vessel.download_mbps, jitter.download_mbps, rng);
    let upload_mbps = step(vessel.upload_mbps, jitter.upload_mbps, rng);

    let mut next = vessel.clone();
    next.live.push(LiveSample {
        timestamp: now,
        signal_strength,
        download_mbps,
        upload_mbps,
        data_usage_mb: vessel.data_usage_mb,
    });
    next.signal_strength = signal_strength;
    next.download_mbps = download_mbps;
    next.upload_mbps = upload_mbps;
    next.last_contact = now;
    next
}

/// `max(0, value + U(-magnitude, magnitude))`, rounded to one decimal.
fn step<R: Rng + ?Sized>(value: f64, magnitude: f64, rng: &mut R) -> f64 {
    let delta = if magnitude.is_finite() && magnitude > 0.0 {
        rng.gen_range(-magnitude..=magnitude)
    } else {
        0.0
    };
    ((value + delta).max(0.0) * 10.0).round() / 10.0
}
