// ── Core error types ──
//
// Errors surfaced by fleetwatch-core. The query engine itself never fails:
// empty collections and stale filter selections are handled by definition.
// What remains is criteria parsing, data source failures, export I/O and
// session lifecycle.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Criteria errors ──────────────────────────────────────────────
    #[error("Invalid {field} filter: '{value}'")]
    InvalidCriteria { field: &'static str, value: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Data source failed: {message}")]
    Source { message: String },

    #[error("Vessel not found: {identifier}")]
    VesselNotFound { identifier: String },

    // ── Export errors ────────────────────────────────────────────────
    #[error("Export failed: {0}")]
    Export(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Export serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Lifecycle errors ─────────────────────────────────────────────
    #[error("Session has been shut down")]
    SessionClosed,

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}
