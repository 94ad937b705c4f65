//! Configuration for fleetwatch sessions.
//!
//! TOML settings layered under `FLEETWATCH_*` environment overrides, and
//! translation to `fleetwatch_core::EngineConfig`. The core crate never
//! reads files; embedders go through this crate or build the engine config
//! by hand.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fleetwatch_core::{EngineConfig, InsightThresholds, JitterConfig, MockConfig};

/// Prefix for environment overrides. Nested keys are separated by `__`,
/// e.g. `FLEETWATCH_FEED__TICK_INTERVAL_MS=250`.
pub const ENV_PREFIX: &str = "FLEETWATCH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedSettings,

    #[serde(default)]
    pub jitter: JitterSettings,

    #[serde(default)]
    pub insights: InsightSettings,

    #[serde(default)]
    pub mock: MockSettings,
}

/// Live feed and refresh cadence.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Milliseconds between live ticks.
    pub tick_interval_ms: u64,

    /// Seconds between full reloads from the data source. 0 disables.
    pub refresh_interval_secs: u64,

    /// Samples kept per vessel in the live window.
    pub live_window: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        let engine = EngineConfig::default();
        Self {
            tick_interval_ms: u64::try_from(engine.tick_interval.as_millis()).unwrap_or(1000),
            refresh_interval_secs: engine.refresh_interval_secs,
            live_window: engine.live_window,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JitterSettings {
    pub signal: u8,
    pub download_mbps: f64,
    pub upload_mbps: f64,
}

impl Default for JitterSettings {
    fn default() -> Self {
        let jitter = JitterConfig::default();
        Self {
            signal: jitter.signal,
            download_mbps: jitter.download_mbps,
            upload_mbps: jitter.upload_mbps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InsightSettings {
    pub min_avg_signal: f64,
    pub max_avg_data_usage_mb: f64,
    pub max_offline: usize,
    pub max_alerts: usize,
    pub max_clients: usize,
}

impl Default for InsightSettings {
    fn default() -> Self {
        let t = InsightThresholds::default();
        Self {
            min_avg_signal: t.min_avg_signal,
            max_avg_data_usage_mb: t.max_avg_data_usage_mb,
            max_offline: t.max_offline,
            max_alerts: t.max_alerts,
            max_clients: t.max_clients,
        }
    }
}

/// Shape of the simulated fleet.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MockSettings {
    pub clients: usize,
    pub fleets_per_client: usize,
    pub vessels_per_fleet: usize,
    pub online_ratio: f64,
    pub history_days: usize,

    /// Fixed seed for reproducible runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MockSettings {
    fn default() -> Self {
        let engine = EngineConfig::default();
        let mock = MockConfig::default();
        Self {
            clients: mock.clients,
            fleets_per_client: mock.fleets_per_client,
            vessels_per_fleet: mock.vessels_per_fleet,
            online_ratio: mock.online_ratio,
            history_days: engine.history_days,
            seed: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "fleetwatch", "fleetwatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("fleetwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file + environment. A missing file is not an
/// error: defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    Ok(config)
}

/// Load config, returning defaults if anything fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Validate settings and build the runtime `EngineConfig`.
pub fn to_engine_config(cfg: &Config) -> Result<EngineConfig, ConfigError> {
    let feed = &cfg.feed;
    if feed.tick_interval_ms == 0 {
        return Err(ConfigError::invalid("feed.tick_interval_ms", "must be positive"));
    }
    if feed.live_window == 0 {
        return Err(ConfigError::invalid("feed.live_window", "must hold at least one sample"));
    }

    let jitter = &cfg.jitter;
    if jitter.signal > 100 {
        return Err(ConfigError::invalid(
            "jitter.signal",
            format!("expected 0-100, got {}", jitter.signal),
        ));
    }
    non_negative("jitter.download_mbps", jitter.download_mbps)?;
    non_negative("jitter.upload_mbps", jitter.upload_mbps)?;

    let insights = &cfg.insights;
    if !(0.0..=100.0).contains(&insights.min_avg_signal) {
        return Err(ConfigError::invalid(
            "insights.min_avg_signal",
            format!("expected 0-100, got {}", insights.min_avg_signal),
        ));
    }
    non_negative("insights.max_avg_data_usage_mb", insights.max_avg_data_usage_mb)?;

    let mock = &cfg.mock;
    if !(0.0..=1.0).contains(&mock.online_ratio) {
        return Err(ConfigError::invalid(
            "mock.online_ratio",
            format!("expected 0.0-1.0, got {}", mock.online_ratio),
        ));
    }
    if mock.history_days == 0 {
        return Err(ConfigError::invalid("mock.history_days", "must be positive"));
    }

    Ok(EngineConfig {
        tick_interval: Duration::from_millis(feed.tick_interval_ms),
        refresh_interval_secs: feed.refresh_interval_secs,
        live_window: feed.live_window,
        history_days: mock.history_days,
        jitter: JitterConfig {
            signal: jitter.signal,
            download_mbps: jitter.download_mbps,
            upload_mbps: jitter.upload_mbps,
        },
        insights: InsightThresholds {
            min_avg_signal: insights.min_avg_signal,
            max_avg_data_usage_mb: insights.max_avg_data_usage_mb,
            max_offline: insights.max_offline,
            max_alerts: insights.max_alerts,
            max_clients: insights.max_clients,
        },
        mock: MockConfig {
            clients: mock.clients,
            fleets_per_client: mock.fleets_per_client,
            vessels_per_fleet: mock.vessels_per_fleet,
            online_ratio: mock.online_ratio,
        },
        rng_seed: mock.seed,
    })
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("expected a non-negative number, got {value}")))
    }
}
