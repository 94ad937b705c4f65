// ── Telemetry series ──
//
// Daily history is produced once by the data source and never changes.
// The live series is a fixed-capacity sliding window advanced by the
// live feed: once full, every push evicts the oldest sample.

use std::collections::VecDeque;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day of aggregated connectivity for a vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySample {
    pub date: NaiveDate,
    pub signal_strength: u8,
    pub data_usage_mb: u64,
    pub download_mbps: f64,
    pub upload_mbps: f64,
}

/// One per-second sample of live connectivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSample {
    pub timestamp: DateTime<Utc>,
    pub signal_strength: u8,
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub data_usage_mb: u64,
}

/// Oldest-first sliding window of live samples.
///
/// Never holds more than `capacity` samples. Deserialized windows are
/// rebuilt through [`LiveSeries::from_samples`], so an oversized or
/// zero-capacity payload is brought back within bounds on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLiveSeries")]
pub struct LiveSeries {
    capacity: usize,
    samples: VecDeque<LiveSample>,
}

/// Wire shape of a [`LiveSeries`], trusted only after normalization.
#[derive(Deserialize)]
struct RawLiveSeries {
    capacity: usize,
    #[serde(default)]
    samples: Vec<LiveSample>,
}

impl From<RawLiveSeries> for LiveSeries {
    fn from(raw: RawLiveSeries) -> Self {
        Self::from_samples(raw.capacity, raw.samples)
    }
}

impl LiveSeries {
    /// Create an empty window. A zero capacity is bumped to one so the
    /// latest sample is always retained.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Build a window from oldest-first samples, keeping only the newest
    /// `capacity` of them.
    pub fn from_samples(capacity: usize, samples: impl IntoIterator<Item = LiveSample>) -> Self {
        let mut series = Self::with_capacity(capacity);
        for sample in samples {
            series.push(sample);
        }
        series
    }

    /// Append the newest sample, evicting the oldest when full.
    pub fn push(&mut self, sample: LiveSample) {
        self.capacity = self.capacity.max(1);
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&LiveSample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&LiveSample> {
        self.samples.front()
    }

    /// The same samples in a window of `capacity`, keeping the newest.
    pub fn resized(&self, capacity: usize) -> Self {
        Self::from_samples(capacity, self.samples.iter().cloned())
    }

    /// Iterate oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &LiveSample> {
        self.samples.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(secs: i64) -> LiveSample {
        LiveSample {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            signal_strength: 50,
            download_mbps: 10.0,
            upload_mbps: 2.0,
            data_usage_mb: 100,
        }
    }

    #[test]
    fn push_evicts_oldest_when_full() {
        let mut series = LiveSeries::with_capacity(3);
        for secs in 0..5 {
            series.push(sample(secs));
        }
        assert_eq!(series.len(), 3);
        assert_eq!(series.oldest().unwrap().timestamp.timestamp(), 2);
        assert_eq!(series.latest().unwrap().timestamp.timestamp(), 4);
    }

    #[test]
    fn from_samples_keeps_newest() {
        let series = LiveSeries::from_samples(2, (0..10).map(sample));
        let stamps: Vec<i64> = series.iter().map(|s| s.timestamp.timestamp()).collect();
        assert_eq!(stamps, vec![8, 9]);
    }

    #[test]
    fn deserialized_oversized_window_is_trimmed() {
        let json = serde_json::json!({
            "capacity": 2,
            "samples": [sample(1), sample(2), sample(3)],
        });
        let mut series: LiveSeries = serde_json::from_value(json).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.oldest().unwrap().timestamp.timestamp(), 2);

        for secs in 4..9 {
            series.push(sample(secs));
        }
        assert_eq!(series.capacity(), 2);
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest().unwrap().timestamp.timestamp(), 8);
    }

    #[test]
    fn deserialized_zero_capacity_is_bumped() {
        let json = serde_json::json!({ "capacity": 0, "samples": [sample(1), sample(2)] });
        let series: LiveSeries = serde_json::from_value(json).unwrap();
        assert_eq!(series.capacity(), 1);
        assert_eq!(series.len(), 1);
        assert_eq!(series.latest().unwrap().timestamp.timestamp(), 2);
    }

    #[test]
    fn resized_keeps_newest_samples() {
        let series = LiveSeries::from_samples(5, (0..5).map(sample));
        let smaller = series.resized(3);
        assert_eq!(smaller.capacity(), 3);
        assert_eq!(smaller.oldest().unwrap().timestamp.timestamp(), 2);
        assert_eq!(series.resized(10).len(), 5);
    }

    #[test]
    fn zero_capacity_still_holds_latest() {
        let mut series = LiveSeries::with_capacity(0);
        series.push(sample(1));
        series.push(sample(2));
        assert_eq!(series.capacity(), 1);
        assert_eq!(series.latest().unwrap().timestamp.timestamp(), 2);
    }
}
