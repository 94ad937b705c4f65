// ── Derived view ──
//
// Filter, then stable sort, then collect the option lists for the client
// and fleet selectors.

use std::cmp::Ordering;
use std::sync::Arc;

use indexmap::IndexSet;
use serde::Serialize;

use crate::model::Vessel;

use super::criteria::{QueryCriteria, SortDirection, SortKey};
use super::filter::VesselPredicate;

/// Result of running a query over a vessel collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FleetView {
    /// Vessels matching every filter, in sort order.
    pub vessels: Vec<Arc<Vessel>>,
    /// Distinct client names across the whole collection, first-seen order.
    pub available_clients: Vec<String>,
    /// Distinct fleet names within the selected client scope, first-seen order.
    pub available_fleets: Vec<String>,
}

impl FleetView {
    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }
}

/// Run `criteria` over `vessels`.
pub fn compute_view(vessels: &[Arc<Vessel>], criteria: &QueryCriteria) -> FleetView {
    let predicate = VesselPredicate::new(criteria);

    let mut matched: Vec<Arc<Vessel>> = vessels
        .iter()
        .filter(|v| predicate.matches(v))
        .cloned()
        .collect();

    // `sort_by` is stable; reversing the comparator for descending order
    // keeps equal keys in input order in both directions.
    let key = criteria.sort_key;
    let direction = criteria.sort_direction;
    matched.sort_by(|a, b| {
        let ord = compare_vessels(a, b, key);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    let available_clients: IndexSet<&str> =
        vessels.iter().map(|v| v.client_name.as_str()).collect();
    let available_fleets: IndexSet<&str> = vessels
        .iter()
        .filter(|v| predicate.matches_client(v))
        .map(|v| v.fleet_name.as_str())
        .collect();

    FleetView {
        vessels: matched,
        available_clients: available_clients.into_iter().map(str::to_owned).collect(),
        available_fleets: available_fleets.into_iter().map(str::to_owned).collect(),
    }
}

/// Ascending comparison of two vessels on a single key.
pub fn compare_vessels(a: &Vessel, b: &Vessel, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => cmp_ignore_case(&a.name, &b.name),
        SortKey::Status => cmp_ignore_case(a.status.as_str(), b.status.as_str()),
        SortKey::Signal => a.signal_strength.cmp(&b.signal_strength),
        SortKey::DataUsage => a.data_usage_mb.cmp(&b.data_usage_mb),
        SortKey::Fleet => cmp_ignore_case(&a.fleet_name, &b.fleet_name),
        SortKey::Client => cmp_ignore_case(&a.client_name, &b.client_name),
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
