// ── Vessel filter predicate ──
//
// Compiled form of the filter half of `QueryCriteria`. The search term is
// lowercased once up front instead of on every vessel. It is matched as
// typed, surrounding whitespace included.

use crate::model::Vessel;

use super::criteria::{NameFilter, QueryCriteria, SignalFilter, StatusFilter};

/// Conjunction of every active filter clause.
#[derive(Debug, Clone)]
pub struct VesselPredicate {
    term: String,
    status: StatusFilter,
    signal: SignalFilter,
    client: NameFilter,
    fleet: NameFilter,
}

impl VesselPredicate {
    pub fn new(criteria: &QueryCriteria) -> Self {
        Self {
            term: criteria.search.to_lowercase(),
            status: criteria.status,
            signal: criteria.signal,
            client: criteria.client().clone(),
            fleet: criteria.fleet().clone(),
        }
    }

    pub fn matches(&self, vessel: &Vessel) -> bool {
        self.matches_text(vessel)
            && self.status.matches(vessel.status)
            && self.signal.matches(vessel.signal_strength)
            && self.client.matches(&vessel.client_name)
            && self.fleet.matches(&vessel.fleet_name)
    }

    /// Case-insensitive substring match against name, location, fleet or
    /// client. An empty term matches everything.
    pub fn matches_text(&self, vessel: &Vessel) -> bool {
        if self.term.is_empty() {
            return true;
        }
        [
            vessel.name.as_str(),
            vessel.location.as_str(),
            vessel.fleet_name.as_str(),
            vessel.client_name.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.term))
    }

    /// Client clause only. Scopes the fleet options offered to the user.
    pub fn matches_client(&self, vessel: &Vessel) -> bool {
        self.client.matches(&vessel.client_name)
    }
}
