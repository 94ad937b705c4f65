// Shared fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::model::{
    ConnectionStatus, Coordinates, Fleet, LiveSample, LiveSeries, Vessel, VesselId, VesselType,
};

pub(crate) const DEFAULT_USAGE_MB: u64 = 100;
pub(crate) const WINDOW: usize = 60;

pub(crate) fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// An online/offline vessel with a full live window and no history.
pub(crate) fn vessel(name: &str, status: ConnectionStatus, signal: u8) -> Vessel {
    vessel_in(name, "Oceanic Freight", "North Star", status, signal)
}

pub(crate) fn vessel_in(
    name: &str,
    client: &str,
    fleet: &str,
    status: ConnectionStatus,
    signal: u8,
) -> Vessel {
    let (download, upload) = if status.is_online() { (40.0, 8.0) } else { (0.0, 0.0) };
    let live = LiveSeries::from_samples(
        WINDOW,
        (0..WINDOW).map(|i| LiveSample {
            timestamp: epoch() + Duration::seconds(i64::try_from(i).unwrap()),
            signal_strength: signal,
            download_mbps: download,
            upload_mbps: upload,
            data_usage_mb: DEFAULT_USAGE_MB,
        }),
    );

    Vessel {
        id: VesselId::new(format!("vsl-{}", name.to_lowercase())),
        name: name.to_owned(),
        vessel_type: VesselType::Cargo,
        fleet_name: fleet.to_owned(),
        client_name: client.to_owned(),
        location: "North Atlantic".to_owned(),
        coordinates: Coordinates::default(),
        status,
        signal_strength: signal,
        download_mbps: download,
        upload_mbps: upload,
        data_usage_mb: DEFAULT_USAGE_MB,
        last_contact: epoch(),
        history: Vec::new(),
        live,
    }
}

pub(crate) fn arcs(vessels: Vec<Vessel>) -> Vec<Arc<Vessel>> {
    vessels.into_iter().map(Arc::new).collect()
}

pub(crate) fn fleet(name: &str, client: &str, vessels: Vec<Vessel>) -> Arc<Fleet> {
    Arc::new(Fleet::new(
        format!("flt-{}", name.to_lowercase()),
        name,
        client,
        VesselType::Cargo,
        arcs(vessels),
    ))
}
