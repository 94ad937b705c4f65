// ── Insight generation ──
//
// Fixed threshold rules over the current aggregates. Purely informational:
// insights are recomputed on every read and never stored.

use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::config::InsightThresholds;

use super::aggregates::Aggregates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InsightKind {
    Success,
    Info,
    Warning,
    Alert,
}

/// A structured recommendation for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub action: String,
}

impl Insight {
    fn new(kind: InsightKind, title: &str, description: String, action: &str) -> Self {
        Self {
            kind,
            title: title.to_owned(),
            description,
            action: action.to_owned(),
        }
    }
}

/// Evaluate every rule against `aggregates`.
///
/// `client_count` is the number of distinct clients in the same collection.
/// An empty collection yields no insights.
pub fn generate_insights(
    aggregates: &Aggregates,
    client_count: usize,
    thresholds: &InsightThresholds,
) -> Vec<Insight> {
    let mut insights = Vec::new();
    if aggregates.total == 0 {
        return insights;
    }

    if aggregates.online > 0 && aggregates.avg_signal_strength < thresholds.min_avg_signal {
        insights.push(Insight::new(
            InsightKind::Warning,
            "Signal Optimization Needed",
            format!(
                "Average signal strength is {:.0}%, below the {:.0}% target. \
                 Consider repositioning antennas or upgrading equipment.",
                aggregates.avg_signal_strength, thresholds.min_avg_signal
            ),
            "Review vessel positioning and satellite coverage maps",
        ));
    }

    if aggregates.avg_data_usage > thresholds.max_avg_data_usage_mb {
        insights.push(Insight::new(
            InsightKind::Info,
            "High Data Usage Detected",
            format!(
                "Fleet average data usage is {:.0} MB, above the {:.0} MB norm. \
                 Bandwidth optimization recommended.",
                aggregates.avg_data_usage, thresholds.max_avg_data_usage_mb
            ),
            "Implement data compression protocols",
        ));
    }

    let offline = aggregates.offline();
    if offline > thresholds.max_offline {
        insights.push(Insight::new(
            InsightKind::Alert,
            "Multiple Vessels Offline",
            format!("{offline} vessels are currently offline. Immediate attention required."),
            "Contact vessel operators for status update",
        ));
    }

    if aggregates.alert_count > thresholds.max_alerts {
        insights.push(Insight::new(
            InsightKind::Alert,
            "Alert Volume Elevated",
            format!(
                "{} vessels are offline or on a weak link.",
                aggregates.alert_count
            ),
            "Triage alerts by client and escalate persistent outages",
        ));
    }

    if client_count > thresholds.max_clients {
        insights.push(Insight::new(
            InsightKind::Info,
            "Large Client Portfolio",
            format!("Monitoring {client_count} clients across the fleet."),
            "Use client filters to focus reviews",
        ));
    }

    if offline == 0 {
        insights.push(Insight::new(
            InsightKind::Success,
            "All Vessels Online",
            format!("All {} vessels are reporting.", aggregates.total),
            "No action required",
        ));
    }

    insights
}
