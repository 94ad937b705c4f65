// ── Query criteria ──
//
// Transient, user-owned filter and sort selections. Criteria never touch
// stored entities; they only shape the derived view.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::CoreError;
use crate::model::ConnectionStatus;

/// Signal strength at or above which a link counts as strong.
pub const STRONG_SIGNAL_THRESHOLD: u8 = 70;

/// Parse a criterion from its user-facing string form.
///
/// ```
/// use fleetwatch_core::query::{parse_criterion, SortKey};
///
/// let key: SortKey = parse_criterion("sort key", "dataUsage").unwrap();
/// assert_eq!(key, SortKey::DataUsage);
/// ```
pub fn parse_criterion<T: FromStr>(field: &'static str, value: &str) -> Result<T, CoreError> {
    value
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidCriteria {
            field,
            value: value.to_owned(),
        })
}

/// Connection status filter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StatusFilter {
    #[default]
    All,
    Online,
    Offline,
}

impl StatusFilter {
    pub fn matches(self, status: ConnectionStatus) -> bool {
        match self {
            Self::All => true,
            Self::Online => status == ConnectionStatus::Online,
            Self::Offline => status == ConnectionStatus::Offline,
        }
    }
}

/// Signal band filter. The three bands partition `0..=100`:
/// `none` is exactly 0, `weak` is 1–69, `strong` is 70 and above.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SignalFilter {
    #[default]
    All,
    Strong,
    Weak,
    None,
}

impl SignalFilter {
    pub fn matches(self, signal: u8) -> bool {
        match self {
            Self::All => true,
            Self::Strong => signal >= STRONG_SIGNAL_THRESHOLD,
            Self::Weak => signal > 0 && signal < STRONG_SIGNAL_THRESHOLD,
            Self::None => signal == 0,
        }
    }
}

/// Client or fleet selection: everything, or one exact name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NameFilter {
    #[default]
    All,
    Named(String),
}

impl NameFilter {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Map a selection widget value onto a filter. `"all"` and the empty
    /// string select everything.
    pub fn from_selection(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(trimmed.to_owned())
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(selected) => selected == name,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(name) => Some(name),
        }
    }
}

/// Column the view is ordered by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum SortKey {
    #[default]
    Name,
    Status,
    Signal,
    #[strum(to_string = "dataUsage", serialize = "data-usage", serialize = "data_usage")]
    DataUsage,
    Fleet,
    Client,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    #[strum(to_string = "asc", serialize = "ascending")]
    Ascending,
    #[strum(to_string = "desc", serialize = "descending")]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The full set of user selections driving a view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryCriteria {
    pub search: String,
    pub status: StatusFilter,
    pub signal: SignalFilter,
    client: NameFilter,
    fleet: NameFilter,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

impl QueryCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> &NameFilter {
        &self.client
    }

    pub fn fleet(&self) -> &NameFilter {
        &self.fleet
    }

    /// Select a client. Any change of client scope resets the fleet
    /// selection to `all`, since the previous fleet may not belong to the
    /// new client. Returns `true` if the fleet filter was reset.
    pub fn set_client(&mut self, client: NameFilter) -> bool {
        if self.client == client {
            return false;
        }
        self.client = client;
        let reset = !self.fleet.is_all();
        self.fleet = NameFilter::All;
        reset
    }

    pub fn set_fleet(&mut self, fleet: NameFilter) {
        self.fleet = fleet;
    }

    /// Column-header style sorting: selecting the active key flips the
    /// direction, selecting a new key sorts it ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Builder-style helpers, mostly for tests and one-shot queries.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_signal(mut self, signal: SignalFilter) -> Self {
        self.signal = signal;
        self
    }

    pub fn with_client(mut self, client: NameFilter) -> Self {
        self.set_client(client);
        self
    }

    pub fn with_fleet(mut self, fleet: NameFilter) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn with_sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.sort_direction = direction;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn signal_bands_partition_range() {
        for signal in 0..=100u8 {
            let bands = [SignalFilter::Strong, SignalFilter::Weak, SignalFilter::None]
                .iter()
                .filter(|band| band.matches(signal))
                .count();
            assert_eq!(bands, 1, "signal {signal} must fall in exactly one band");
        }
    }

    #[test]
    fn signal_band_boundaries() {
        assert!(SignalFilter::Strong.matches(70));
        assert!(!SignalFilter::Weak.matches(70));
        assert!(SignalFilter::Weak.matches(69));
        assert!(SignalFilter::Weak.matches(1));
        assert!(!SignalFilter::Weak.matches(0));
        assert!(SignalFilter::None.matches(0));
    }

    #[test]
    fn status_filter_matches() {
        assert!(StatusFilter::All.matches(ConnectionStatus::Offline));
        assert!(StatusFilter::Online.matches(ConnectionStatus::Online));
        assert!(!StatusFilter::Online.matches(ConnectionStatus::Offline));
    }

    #[test]
    fn changing_client_resets_fleet() {
        let mut criteria = QueryCriteria::new();
        criteria.set_client(NameFilter::named("Oceanic Freight"));
        criteria.set_fleet(NameFilter::named("North Star"));

        assert!(criteria.set_client(NameFilter::named("Polar Lines")));
        assert_eq!(criteria.fleet(), &NameFilter::All);
    }

    #[test]
    fn clearing_client_resets_fleet() {
        let mut criteria = QueryCriteria::new()
            .with_client(NameFilter::named("Oceanic Freight"))
            .with_fleet(NameFilter::named("North Star"));

        criteria.set_client(NameFilter::All);
        assert!(criteria.fleet().is_all());
    }

    #[test]
    fn reselecting_same_client_keeps_fleet() {
        let mut criteria = QueryCriteria::new()
            .with_client(NameFilter::named("Oceanic Freight"))
            .with_fleet(NameFilter::named("North Star"));

        assert!(!criteria.set_client(NameFilter::named("Oceanic Freight")));
        assert_eq!(criteria.fleet(), &NameFilter::named("North Star"));
    }

    #[test]
    fn toggle_sort_flips_then_resets() {
        let mut criteria = QueryCriteria::new();
        criteria.toggle_sort(SortKey::Name);
        assert_eq!(criteria.sort_direction, SortDirection::Descending);

        criteria.toggle_sort(SortKey::Signal);
        assert_eq!(criteria.sort_key, SortKey::Signal);
        assert_eq!(criteria.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn parses_user_facing_strings() {
        assert_eq!(
            parse_criterion::<StatusFilter>("status", "Online").unwrap(),
            StatusFilter::Online
        );
        assert_eq!(
            parse_criterion::<SignalFilter>("signal", "none").unwrap(),
            SignalFilter::None
        );
        assert_eq!(
            parse_criterion::<SortKey>("sort key", "data_usage").unwrap(),
            SortKey::DataUsage
        );
        assert_eq!(
            parse_criterion::<SortDirection>("sort direction", "desc").unwrap(),
            SortDirection::Descending
        );
        assert_eq!(SortKey::DataUsage.to_string(), "dataUsage");
    }

    #[test]
    fn rejects_unknown_criterion() {
        let err = parse_criterion::<SignalFilter>("signal", "medium").unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidCriteria { field: "signal", ref value } if value == "medium"
        ));
    }

    #[test]
    fn name_filter_from_selection() {
        assert!(NameFilter::from_selection("all").is_all());
        assert!(NameFilter::from_selection("  ").is_all());
        assert_eq!(
            NameFilter::from_selection("Polar Lines").as_name(),
            Some("Polar Lines")
        );
    }
}
