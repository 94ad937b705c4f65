use indexmap::IndexSet;
use serde::Serialize;

use crate::model::Vessel;

/// Headline numbers for a vessel collection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Aggregates {
    pub total: usize,
    pub online: usize,
    pub alert_count: usize,
    /// Mean data usage (MB) over all vessels; 0 for an empty collection.
    pub avg_data_usage: f64,
    /// Mean signal over online vessels only; 0 when none are online.
    pub avg_signal_strength: f64,
}

impl Aggregates {
    pub fn offline(&self) -> usize {
        self.total - self.online
    }
}

/// Reduce a collection to its [`Aggregates`] in a single pass.
pub fn compute_aggregates<'a, I>(vessels: I) -> Aggregates
where
    I: IntoIterator<Item = &'a Vessel>,
{
    let mut total = 0usize;
    let mut online = 0usize;
    let mut alert_count = 0usize;
    let mut usage_sum = 0u64;
    let mut online_signal_sum = 0u64;

    for vessel in vessels {
        total += 1;
        usage_sum = usage_sum.saturating_add(vessel.data_usage_mb);
        if vessel.is_online() {
            online += 1;
            online_signal_sum += u64::from(vessel.signal_strength);
        }
        if vessel.alert() {
            alert_count += 1;
        }
    }

    Aggregates {
        total,
        online,
        alert_count,
        avg_data_usage: mean(usage_sum, total),
        avg_signal_strength: mean(online_signal_sum, online),
    }
}

/// Number of distinct client names in a collection.
pub fn distinct_clients<'a, I>(vessels: I) -> usize
where
    I: IntoIterator<Item = &'a Vessel>,
{
    vessels
        .into_iter()
        .map(|v| v.client_name.as_str())
        .collect::<IndexSet<_>>()
        .len()
}

#[allow(clippy::cast_precision_loss)]
fn mean(sum: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConnectionStatus;
    use crate::test_support::{DEFAULT_USAGE_MB, vessel, vessel_in};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_collection_is_all_zero() {
        let aggregates = compute_aggregates(std::iter::empty());
        assert_eq!(aggregates, Aggregates::default());
        assert!(!aggregates.avg_signal_strength.is_nan());
        assert!(!aggregates.avg_data_usage.is_nan());
    }

    #[test]
    fn mixed_fleet_counts_and_means() {
        let vessels = [
            vessel("Alpha", ConnectionStatus::Online, 80),
            vessel("Beta", ConnectionStatus::Offline, 0),
            vessel("Gamma", ConnectionStatus::Online, 20),
        ];
        let aggregates = compute_aggregates(&vessels);

        assert_eq!(aggregates.total, 3);
        assert_eq!(aggregates.online, 2);
        assert_eq!(aggregates.offline(), 1);
        assert_eq!(aggregates.alert_count, 2);
        assert!((aggregates.avg_signal_strength - 50.0).abs() < f64::EPSILON);
        #[allow(clippy::cast_precision_loss)]
        let expected_usage = DEFAULT_USAGE_MB as f64;
        assert!((aggregates.avg_data_usage - expected_usage).abs() < f64::EPSILON);
    }

    #[test]
    fn all_offline_signal_mean_is_zero() {
        let vessels = [
            vessel("A", ConnectionStatus::Offline, 0),
            vessel("B", ConnectionStatus::Offline, 0),
        ];
        let aggregates = compute_aggregates(&vessels);
        assert_eq!(aggregates.online, 0);
        assert!(aggregates.avg_signal_strength.abs() < f64::EPSILON);
        assert_eq!(aggregates.alert_count, 2);
    }

    #[test]
    fn usage_mean_includes_offline_vessels() {
        let mut a = vessel("A", ConnectionStatus::Online, 90);
        a.data_usage_mb = 300;
        let mut b = vessel("B", ConnectionStatus::Offline, 0);
        b.data_usage_mb = 0;
        let aggregates = compute_aggregates([&a, &b]);
        assert!((aggregates.avg_data_usage - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_distinct_clients() {
        let vessels = [
            vessel_in("A", "Oceanic", "N", ConnectionStatus::Online, 80),
            vessel_in("B", "Polar", "I", ConnectionStatus::Online, 80),
            vessel_in("C", "Oceanic", "S", ConnectionStatus::Online, 80),
        ];
        assert_eq!(distinct_clients(&vessels), 2);
        assert_eq!(distinct_clients(std::iter::empty()), 0);
    }
}
