// ── Vessel domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use super::entity_id::VesselId;
use super::series::{DailySample, LiveSeries};

/// Signal strength below which an online vessel raises a weak-signal alert.
pub const WEAK_SIGNAL_THRESHOLD: u8 = 30;

/// Clamp a signed signal reading into the valid `0..=100` range.
pub(crate) fn clamp_signal(value: i32) -> u8 {
    u8::try_from(value.clamp(0, 100)).unwrap_or(100)
}

/// Hull category of a vessel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum VesselType {
    Cargo,
    Tanker,
    Container,
    Bulk,
}

/// Satellite link state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ConnectionStatus {
    Online,
    Offline,
}

impl ConnectionStatus {
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Why a vessel needs attention. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AlertType {
    None,
    WeakSignal,
    Offline,
}

/// Informational position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A single monitored vessel with its connectivity telemetry.
///
/// Fleet and client names are denormalized onto the vessel so that the
/// query engine can filter a flat vessel list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vessel {
    pub id: VesselId,
    pub name: String,
    pub vessel_type: VesselType,

    // Membership
    pub fleet_name: String,
    pub client_name: String,

    // Position
    pub location: String,
    pub coordinates: Coordinates,

    // Connectivity
    pub status: ConnectionStatus,
    pub signal_strength: u8,
    pub download_mbps: f64,
    pub upload_mbps: f64,

    // Usage for the current period
    pub data_usage_mb: u64,

    pub last_contact: DateTime<Utc>,

    // Telemetry
    pub history: Vec<DailySample>,
    pub live: LiveSeries,
}

impl Vessel {
    pub fn is_online(&self) -> bool {
        self.status.is_online()
    }

    /// `true` when the vessel is offline or its signal is weak.
    pub fn alert(&self) -> bool {
        self.alert_type() != AlertType::None
    }

    pub fn alert_type(&self) -> AlertType {
        if !self.is_online() {
            AlertType::Offline
        } else if self.signal_strength < WEAK_SIGNAL_THRESHOLD {
            AlertType::WeakSignal
        } else {
            AlertType::None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::vessel;

    #[test]
    fn offline_vessel_alerts_as_offline() {
        let v = vessel("Beta", ConnectionStatus::Offline, 0);
        assert!(v.alert());
        assert_eq!(v.alert_type(), AlertType::Offline);
    }

    #[test]
    fn offline_takes_precedence_over_signal() {
        // Source data is not validated; a stale signal on an offline vessel
        // must still classify as offline.
        let v = vessel("Ghost", ConnectionStatus::Offline, 80);
        assert_eq!(v.alert_type(), AlertType::Offline);
    }

    #[test]
    fn weak_signal_boundary() {
        let weak = vessel("Weak", ConnectionStatus::Online, 29);
        let ok = vessel("Ok", ConnectionStatus::Online, 30);
        assert_eq!(weak.alert_type(), AlertType::WeakSignal);
        assert!(weak.alert());
        assert_eq!(ok.alert_type(), AlertType::None);
        assert!(!ok.alert());
    }

    #[test]
    fn alert_formula_holds_across_signal_range() {
        for status in [ConnectionStatus::Online, ConnectionStatus::Offline] {
            for signal in 0..=100u8 {
                let v = vessel("V", status, signal);
                let expected = !status.is_online() || signal < WEAK_SIGNAL_THRESHOLD;
                assert_eq!(v.alert(), expected, "status={status} signal={signal}");
            }
        }
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            "ONLINE".parse::<ConnectionStatus>().unwrap(),
            ConnectionStatus::Online
        );
        assert_eq!(ConnectionStatus::Offline.as_str(), "offline");
        assert_eq!("tanker".parse::<VesselType>().unwrap(), VesselType::Tanker);
    }

    #[test]
    fn clamp_signal_bounds() {
        assert_eq!(clamp_signal(-4), 0);
        assert_eq!(clamp_signal(42), 42);
        assert_eq!(clamp_signal(104), 100);
    }

    #[test]
    fn alert_type_display_is_kebab_case() {
        assert_eq!(AlertType::WeakSignal.to_string(), "weak-signal");
        assert_eq!(AlertType::None.to_string(), "none");
    }
}
