//! Query engine and live state for vessel connectivity monitoring.
//!
//! This crate owns the domain model, the snapshot store and every derived
//! computation behind the fleetwatch dashboard:
//!
//! - **[`Session`]**: Explicit per-dashboard context. [`start()`](Session::start)
//!   loads the first snapshot from a [`FleetSource`] and spawns the simulated
//!   live feed (plus an optional periodic refresh). Criteria setters and
//!   derived reads (`view`, `aggregates`, `insights`, `alerts`, export) live
//!   here too.
//!
//! - **[`DataStore`]**: Holds the fleet collection as one `Arc` snapshot in a
//!   `tokio::sync::watch` channel. Refreshes replace it wholesale; ticks
//!   publish a successor. Readers never observe a half-applied update.
//!
//! - **[`EntityStream<T>`]**: Subscription handle vended by the store, with
//!   `current()` / `latest()` / `changed()` and a `Stream` adapter.
//!
//! - **Query engine** ([`query`]): Pure filter + stable sort over a flat
//!   vessel list, with cascading client → fleet scoping.
//!
//! - **Metrics** ([`metrics`]): Zero-safe aggregates and threshold insights.
//!
//! - **Live feed** ([`live`]): The bounded random-walk tick and its timer task.

pub mod config;
pub mod error;
pub mod export;
pub mod live;
pub mod metrics;
pub mod model;
pub mod query;
pub mod session;
pub mod source;
pub mod store;
pub mod stream;

#[cfg(test)]
mod test_support;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{EngineConfig, InsightThresholds, JitterConfig, MockConfig};
pub use error::CoreError;
pub use export::{EXPORT_COLUMNS, ExportFormat, ExportRow};
pub use metrics::{Aggregates, Insight, InsightKind, compute_aggregates, generate_insights};
pub use query::{
    FleetView, NameFilter, QueryCriteria, SignalFilter, SortDirection, SortKey, StatusFilter,
    compute_view,
};
pub use session::Session;
pub use source::{FleetSource, MockFleetSource, StaticFleetSource};
pub use store::DataStore;
pub use stream::EntityStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AlertType, ConnectionStatus, Coordinates, DailySample, Fleet, FleetId, FleetSummary,
    LiveSample, LiveSeries, Vessel, VesselId, VesselType,
};
