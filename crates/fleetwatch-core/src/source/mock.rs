// ── Mock fleet generator ──
//
// Synthesizes a plausible client → fleet → vessel hierarchy with 30 days
// of history and a full live window per vessel. Seeded generators produce
// identical fleets apart from wall-clock timestamps.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::FleetSource;
use crate::config::{EngineConfig, MockConfig};
use crate::error::CoreError;
use crate::model::vessel::clamp_signal;
use crate::model::{
    ConnectionStatus, Coordinates, DailySample, Fleet, FleetId, LiveSample, LiveSeries, Vessel,
    VesselId, VesselType,
};

const CLIENT_NAMES: [&str; 12] = [
    "Oceanic Freight",
    "Polar Lines",
    "Meridian Shipping",
    "Blue Anchor Logistics",
    "Northwind Maritime",
    "Coral Bay Carriers",
    "Atlas Tankers",
    "Harborline Group",
    "Seastar Bulk",
    "Trident Marine",
    "Equator Express",
    "Kestrel Offshore",
];

const DIVISIONS: [&str; 6] = [
    "Atlantic",
    "Pacific",
    "Coastal",
    "Deep Water",
    "Northern Route",
    "Southern Route",
];

const VESSEL_NAMES: [&str; 20] = [
    "Atlantic Explorer",
    "Pacific Dawn",
    "Ocean Master",
    "Sea Guardian",
    "Marine Pioneer",
    "Coastal Ranger",
    "Deep Sea Hunter",
    "Wave Rider",
    "Storm Chaser",
    "Blue Horizon",
    "Arctic Voyager",
    "Tropical Wind",
    "Ocean Spirit",
    "Sea Breeze",
    "Maritime Glory",
    "Neptune's Pride",
    "Coral Explorer",
    "Tide Runner",
    "Seafarer",
    "Ocean Quest",
];

const LOCATIONS: [&str; 10] = [
    "North Atlantic",
    "Pacific Ocean",
    "Mediterranean Sea",
    "Indian Ocean",
    "Gulf of Mexico",
    "Caribbean Sea",
    "Red Sea",
    "Baltic Sea",
    "North Sea",
    "Arabian Sea",
];

const VESSEL_TYPES: [VesselType; 4] = [
    VesselType::Cargo,
    VesselType::Tanker,
    VesselType::Container,
    VesselType::Bulk,
];

/// Random fleet generator standing in for a real telemetry backend.
pub struct MockFleetSource {
    shape: MockConfig,
    live_window: usize,
    history_days: usize,
    rng: Mutex<StdRng>,
}

impl MockFleetSource {
    pub fn new(config: &EngineConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            shape: config.mock,
            live_window: config.live_window,
            history_days: config.history_days,
            rng: Mutex::new(rng),
        }
    }

    fn online_probability(&self) -> f64 {
        let ratio = self.shape.online_ratio;
        if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn generate(&self, rng: &mut StdRng, now: DateTime<Utc>) -> Vec<Fleet> {
        let mut fleets = Vec::new();
        let mut vessel_seq = 0usize;

        for client_idx in 0..self.shape.clients {
            let client = numbered(&CLIENT_NAMES, client_idx);
            let prefix = client.split_whitespace().next().unwrap_or("Fleet").to_owned();

            for division_idx in 0..self.shape.fleets_per_client {
                let fleet_name = format!("{prefix} {}", numbered(&DIVISIONS, division_idx));
                let vessel_type = VESSEL_TYPES[rng.gen_range(0..VESSEL_TYPES.len())];

                let vessels = (0..self.shape.vessels_per_fleet)
                    .map(|_| {
                        vessel_seq += 1;
                        Arc::new(self.vessel(
                            rng,
                            now,
                            vessel_seq,
                            &client,
                            &fleet_name,
                            vessel_type,
                        ))
                    })
                    .collect();

                fleets.push(Fleet::new(
                    FleetId::new(format!("flt-{:03}", fleets.len() + 1)),
                    fleet_name,
                    client.clone(),
                    vessel_type,
                    vessels,
                ));
            }
        }

        fleets
    }

    fn vessel(
        &self,
        rng: &mut StdRng,
        now: DateTime<Utc>,
        seq: usize,
        client: &str,
        fleet: &str,
        vessel_type: VesselType,
    ) -> Vessel {
        let online = rng.gen_bool(self.online_probability());
        let status = if online {
            ConnectionStatus::Online
        } else {
            ConnectionStatus::Offline
        };

        let (signal_strength, download_mbps, upload_mbps, data_usage_mb) = if online {
            (
                rng.gen_range(20..=100u8),
                round1(rng.gen_range(10.0..100.0)),
                round1(rng.gen_range(2.0..20.0)),
                rng.gen_range(50..550u64),
            )
        } else {
            (0, 0.0, 0.0, 0)
        };

        let last_contact = if online {
            now - Duration::seconds(rng.gen_range(0..300))
        } else {
            now - Duration::seconds(rng.gen_range(3_600..7 * 86_400))
        };

        let history = (0..self.history_days)
            .map(|i| {
                let days_ago = i64::try_from(self.history_days - 1 - i).unwrap_or(0);
                let base = rng.gen_range(40..80) + if online { 20 } else { -20 };
                DailySample {
                    date: now.date_naive() - Duration::days(days_ago),
                    signal_strength: clamp_signal(base),
                    data_usage_mb: rng.gen_range(100..500),
                    download_mbps: round1(rng.gen_range(5.0..90.0)),
                    upload_mbps: round1(rng.gen_range(1.0..18.0)),
                }
            })
            .collect();

        // Random walk leading up to the current reading, which is always
        // the newest sample in the window.
        let window = self.live_window.max(1);
        let live = LiveSeries::from_samples(
            window,
            (0..window).map(|i| {
                let secs_ago = i64::try_from(window - 1 - i).unwrap_or(0);
                let newest = secs_ago == 0;
                let sample = |current: f64, spread: f64, rng: &mut StdRng| {
                    if newest || !online {
                        current
                    } else {
                        round1((current + rng.gen_range(-spread..=spread)).max(0.0))
                    }
                };
                let signal = if newest || !online {
                    signal_strength
                } else {
                    clamp_signal(i32::from(signal_strength) + rng.gen_range(-5..=5))
                };
                LiveSample {
                    timestamp: now - Duration::seconds(secs_ago),
                    signal_strength: signal,
                    download_mbps: sample(download_mbps, 8.0, rng),
                    upload_mbps: sample(upload_mbps, 3.0, rng),
                    data_usage_mb,
                }
            }),
        );

        Vessel {
            id: VesselId::new(format!("vsl-{seq:04}")),
            name: numbered(&VESSEL_NAMES, seq - 1),
            vessel_type,
            fleet_name: fleet.to_owned(),
            client_name: client.to_owned(),
            location: LOCATIONS[rng.gen_range(0..LOCATIONS.len())].to_owned(),
            coordinates: Coordinates {
                lat: round4(rng.gen_range(-90.0..90.0)),
                lng: round4(rng.gen_range(-180.0..180.0)),
            },
            status,
            signal_strength,
            download_mbps,
            upload_mbps,
            data_usage_mb,
            last_contact,
            history,
            live,
        }
    }
}

impl FleetSource for MockFleetSource {
    fn load(&self) -> Result<Vec<Fleet>, CoreError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| CoreError::Internal("mock source RNG lock poisoned".into()))?;
        let fleets = self.generate(&mut rng, Utc::now());
        debug!(
            fleets = fleets.len(),
            vessels = fleets.iter().map(|f| f.vessels().len()).sum::<usize>(),
            "generated mock fleet"
        );
        Ok(fleets)
    }
}

/// Pick `names[idx]`, cycling with a numeric suffix once the list runs out.
fn numbered(names: &[&str], idx: usize) -> String {
    let base = names[idx % names.len()];
    match idx / names.len() {
        0 => base.to_owned(),
        round => format!("{base} {}", round + 1),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
