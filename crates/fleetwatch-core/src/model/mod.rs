// ── Unified domain model ──
//
// Canonical representation of every monitored asset. Data sources build
// these types; the query engine, metrics and live feed only read them or
// derive new values from them.

pub mod entity_id;
pub mod fleet;
pub mod series;
pub mod vessel;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use fleetwatch_core::model::*` gives you everything.

// Core identity
pub use entity_id::{FleetId, VesselId};

// Vessel
pub use vessel::{AlertType, ConnectionStatus, Coordinates, Vessel, VesselType};

// Time series
pub use series::{DailySample, LiveSample, LiveSeries};

// Fleet
pub use fleet::{Fleet, FleetSummary};
