// ── Runtime engine configuration ──
//
// These types describe *how* a session simulates and evaluates its fleet.
// They never touch disk: fleetwatch-config (or an embedding application)
// constructs an `EngineConfig` and hands it in.

use std::time::Duration;

/// Symmetric bound of the random walk applied to live metrics per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterConfig {
    /// Signal strength, in percentage points.
    pub signal: u8,
    /// Download throughput, in Mbps.
    pub download_mbps: f64,
    /// Upload throughput, in Mbps.
    pub upload_mbps: f64,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            signal: 5,
            download_mbps: 8.0,
            upload_mbps: 3.0,
        }
    }
}

/// Thresholds used by insight generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightThresholds {
    /// Warn when mean online signal drops below this.
    pub min_avg_signal: f64,
    /// Inform when mean data usage (MB) rises above this.
    pub max_avg_data_usage_mb: f64,
    /// Alert when more vessels than this are offline.
    pub max_offline: usize,
    /// Alert when more vessels than this carry an alert.
    pub max_alerts: usize,
    /// Inform when more distinct clients than this are monitored.
    pub max_clients: usize,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            min_avg_signal: 60.0,
            max_avg_data_usage_mb: 300.0,
            max_offline: 3,
            max_alerts: 5,
            max_clients: 8,
        }
    }
}

/// Shape of the fleet produced by the mock data source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockConfig {
    pub clients: usize,
    pub fleets_per_client: usize,
    pub vessels_per_fleet: usize,
    /// Probability in `[0, 1]` that a generated vessel is online.
    pub online_ratio: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            clients: 6,
            fleets_per_client: 2,
            vessels_per_fleet: 4,
            online_ratio: 0.8,
        }
    }
}

/// Configuration for a single monitoring session.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Live feed tick period.
    pub tick_interval: Duration,
    /// How often to reload the whole fleet from the source (seconds). 0 = never.
    pub refresh_interval_secs: u64,
    /// Number of samples kept in each vessel's live window.
    pub live_window: usize,
    /// Number of daily samples generated per vessel.
    pub history_days: usize,
    pub jitter: JitterConfig,
    pub insights: InsightThresholds,
    pub mock: MockConfig,
    /// Fixed RNG seed for reproducible simulations.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            refresh_interval_secs: 0,
            live_window: 60,
            history_days: 30,
            jitter: JitterConfig::default(),
            insights: InsightThresholds::default(),
            mock: MockConfig::default(),
            rng_seed: None,
        }
    }
}
