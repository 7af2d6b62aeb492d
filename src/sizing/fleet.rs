//! Per-call estimation inputs: fleet composition and station parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Vehicle counts keyed by vehicle-type identifier (e.g. `"2W"`).
///
/// Identifiers are not checked against any assumption table here; the
/// estimator ignores types it does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FleetInput(BTreeMap<String, u64>);

impl FleetInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count for `vehicle_type`, returning the previous count.
    pub fn insert(&mut self, vehicle_type: impl Into<String>, count: u64) -> Option<u64> {
        self.0.insert(vehicle_type.into(), count)
    }

    pub fn get(&self, vehicle_type: &str) -> Option<u64> {
        self.0.get(vehicle_type).copied()
    }

    /// Iterates `(vehicle_type, count)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Total vehicles across all types, known or not.
    pub fn total_vehicles(&self) -> u64 {
        self.0.values().sum()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for FleetInput {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>, const N: usize> From<[(K, u64); N]> for FleetInput {
    fn from(pairs: [(K, u64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Station utilization and fleet running share, both in percent.
///
/// Values are expected in `[0, 100]` but are not enforced here; callers
/// that take user input should apply [`EstimationParameters::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationParameters {
    /// Share of rated port power realised on average (%).
    pub utilization_pct: f64,
    /// Share of the fleet operating on a given day (%).
    pub running_pct: f64,
}

impl EstimationParameters {
    pub fn new(utilization_pct: f64, running_pct: f64) -> Self {
        Self {
            utilization_pct,
            running_pct,
        }
    }

    /// Returns a copy with both percentages clamped to `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self {
            utilization_pct: self.utilization_pct.clamp(0.0, 100.0),
            running_pct: self.running_pct.clamp(0.0, 100.0),
        }
    }

    /// Whether both percentages already lie in `[0, 100]`.
    pub fn in_range(&self) -> bool {
        (0.0..=100.0).contains(&self.utilization_pct) && (0.0..=100.0).contains(&self.running_pct)
    }

    pub fn utilization_fraction(&self) -> f64 {
        self.utilization_pct / 100.0
    }

    pub fn running_fraction(&self) -> f64 {
        self.running_pct / 100.0
    }
}
