//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::sizing::{ClassDemand, EstimateBreakdown, EstimationParameters, FleetInput};

/// Body of `POST /estimate`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateRequest {
    /// Vehicle counts by type; omitted means an empty fleet.
    #[serde(default)]
    pub fleet: FleetInput,
    /// Station utilization (%).
    pub utilization_pct: f64,
    /// Share of the fleet running daily (%).
    pub running_pct: f64,
}

impl EstimateRequest {
    /// Parameters clamped to `[0, 100]`, as the estimator expects.
    pub fn parameters(&self) -> EstimationParameters {
        EstimationParameters::new(self.utilization_pct, self.running_pct).clamped()
    }
}

/// Successful estimate.
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    /// Continuous station count, rounded to 2 decimals.
    pub required_stations: f64,
    /// Whole stations to build.
    pub stations_to_provision: u64,
    /// Daily fleet energy demand (kWh).
    pub total_energy_kwh: f64,
    /// Energy one station delivers per day (kWh).
    pub station_capacity_kwh_per_day: f64,
    /// Derated average power per station (kW).
    pub effective_power_per_station_kw: f64,
    /// Fleet entries without assumptions.
    pub ignored_vehicle_types: Vec<String>,
    /// Per-class demand.
    pub classes: Vec<ClassDemand>,
}

impl From<EstimateBreakdown> for EstimateResponse {
    fn from(b: EstimateBreakdown) -> Self {
        Self {
            required_stations: b.required_stations,
            stations_to_provision: b.stations_to_provision(),
            total_energy_kwh: b.total_energy_kwh,
            station_capacity_kwh_per_day: b.station_capacity_kwh_per_day,
            effective_power_per_station_kw: b.effective_power_per_station_kw,
            ignored_vehicle_types: b.ignored_vehicle_types,
            classes: b.classes,
        }
    }
}

/// Error response body for 4xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
