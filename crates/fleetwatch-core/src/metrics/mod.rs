// ── Fleet-wide metrics ──
//
// Scalar aggregates over a vessel collection and the threshold-based
// insights derived from them.

mod aggregates;
mod insights;

pub use aggregates::{Aggregates, compute_aggregates, distinct_clients};
pub use insights::{Insight, InsightKind, generate_insights};
