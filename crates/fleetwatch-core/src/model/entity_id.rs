// ── Core identity types ──
//
// Vessel and fleet identifiers are opaque strings assigned by the data
// source. Distinct newtypes keep the two from being mixed up in lookups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── VesselId ────────────────────────────────────────────────────────

/// Unique identifier of a single vessel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VesselId(String);

impl VesselId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VesselId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for VesselId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VesselId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── FleetId ─────────────────────────────────────────────────────────

/// Unique identifier of a fleet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FleetId(String);

impl FleetId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FleetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FleetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FleetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn vessel_id_from_str() {
        let id: VesselId = "vsl-001".parse().unwrap();
        assert_eq!(id.as_str(), "vsl-001");
        assert_eq!(id.to_string(), "vsl-001");
    }

    #[test]
    fn vessel_id_serializes_as_plain_string() {
        let id = VesselId::from("vsl-042");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"vsl-042\"");
    }

    #[test]
    fn fleet_id_display() {
        let id = FleetId::from("flt-3");
        assert_eq!(id.to_string(), "flt-3");
    }
}
