// ── Fleet domain types ──
//
// A fleet owns an ordered vessel list and a summary derived from it. The
// summary is private and rebuilt on every construction so it can never
// drift from the vessels it describes.

use std::sync::Arc;

use serde::Serialize;

use super::entity_id::FleetId;
use super::vessel::{Vessel, VesselType};

/// Cached per-fleet aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FleetSummary {
    pub vessel_count: usize,
    pub online_count: usize,
    /// Mean signal over online vessels; 0 when none are online.
    pub avg_signal_strength: f64,
    pub total_data_usage_mb: u64,
}

impl FleetSummary {
    fn derive(vessels: &[Arc<Vessel>]) -> Self {
        let mut online_count = 0usize;
        let mut online_signal = 0u64;
        let mut total_data_usage_mb = 0u64;

        for vessel in vessels {
            if vessel.is_online() {
                online_count += 1;
                online_signal += u64::from(vessel.signal_strength);
            }
            total_data_usage_mb = total_data_usage_mb.saturating_add(vessel.data_usage_mb);
        }

        #[allow(clippy::cast_precision_loss)]
        let avg_signal_strength = if online_count == 0 {
            0.0
        } else {
            online_signal as f64 / online_count as f64
        };

        Self {
            vessel_count: vessels.len(),
            online_count,
            avg_signal_strength,
            total_data_usage_mb,
        }
    }
}

/// A named group of vessels operated for one client.
#[derive(Debug, Clone, Serialize)]
pub struct Fleet {
    id: FleetId,
    name: String,
    client_name: String,
    vessel_type: VesselType,
    vessels: Vec<Arc<Vessel>>,
    summary: FleetSummary,
}

impl Fleet {
    pub fn new(
        id: impl Into<FleetId>,
        name: impl Into<String>,
        client_name: impl Into<String>,
        vessel_type: VesselType,
        vessels: Vec<Arc<Vessel>>,
    ) -> Self {
        let summary = FleetSummary::derive(&vessels);
        Self {
            id: id.into(),
            name: name.into(),
            client_name: client_name.into(),
            vessel_type,
            vessels,
            summary,
        }
    }

    /// Same fleet identity with a replaced vessel list; the summary is
    /// rederived.
    pub fn with_vessels(&self, vessels: Vec<Arc<Vessel>>) -> Self {
        let summary = FleetSummary::derive(&vessels);
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            client_name: self.client_name.clone(),
            vessel_type: self.vessel_type,
            vessels,
            summary,
        }
    }

    pub fn id(&self) -> &FleetId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn vessel_type(&self) -> VesselType {
        self.vessel_type
    }

    pub fn vessels(&self) -> &[Arc<Vessel>] {
        &self.vessels
    }

    pub fn summary(&self) -> FleetSummary {
        self.summary
    }
}
