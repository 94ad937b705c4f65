// ── Fleet query engine ──
//
// Turns a flat vessel collection plus user-selected criteria into an
// ordered view and the option lists used to populate filter controls.
// Everything here is pure: no store access, no side effects.

mod criteria;
mod filter;
mod view;

pub use criteria::{
    NameFilter, QueryCriteria, STRONG_SIGNAL_THRESHOLD, SignalFilter, SortDirection, SortKey,
    StatusFilter, parse_criterion,
};
pub use filter::VesselPredicate;
pub use view::{FleetView, compare_vessels, compute_view};
