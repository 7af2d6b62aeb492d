//! Estimate results with the intermediate quantities that produced them.

use std::fmt;

use serde::Serialize;

/// Daily demand contributed by one vehicle class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDemand {
    /// Vehicle-type identifier.
    pub vehicle_type: String,
    /// Registered vehicles of this type.
    pub vehicles: u64,
    /// Swaps per day: `vehicles * running share * swaps per vehicle`.
    pub daily_swaps: f64,
    /// Energy per day (kWh): `daily_swaps * energy per swap`.
    pub energy_kwh: f64,
}

/// Full result of one estimation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateBreakdown {
    /// Demand per recognised vehicle class, in identifier order.
    pub classes: Vec<ClassDemand>,
    /// Fleet entries skipped because the assumption table has no such type.
    pub ignored_vehicle_types: Vec<String>,
    /// Daily energy the fleet draws from stations (kWh).
    pub total_energy_kwh: f64,
    /// Average deliverable power of one station after derating (kW).
    pub effective_power_per_station_kw: f64,
    /// Energy one station delivers per day (kWh).
    pub station_capacity_kwh_per_day: f64,
    /// Continuous station count, rounded to 2 decimals.
    pub required_stations: f64,
}

impl EstimateBreakdown {
    /// Whole stations to build for this estimate (ceiling of the continuous count).
    ///
    /// Negative estimates, which only arise from out-of-range inputs, yield 0.
    pub fn stations_to_provision(&self) -> u64 {
        let ceil = self.required_stations.ceil();
        if ceil > 0.0 { ceil as u64 } else { 0 }
    }

    /// Total daily swaps across recognised classes.
    pub fn total_daily_swaps(&self) -> f64 {
        self.classes.iter().map(|c| c.daily_swaps).sum()
    }
}

impl fmt::Display for EstimateBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Swap Station Estimate ---")?;
        for c in &self.classes {
            writeln!(
                f,
                "{:<6} {:>8} vehicles  {:>10.2} swaps/day  {:>10.2} kWh/day",
                c.vehicle_type, c.vehicles, c.daily_swaps, c.energy_kwh
            )?;
        }
        if !self.ignored_vehicle_types.is_empty() {
            writeln!(f, "Ignored vehicle types:  {}", self.ignored_vehicle_types.join(", "))?;
        }
        writeln!(f, "Total energy needed:    {:.2} kWh/day", self.total_energy_kwh)?;
        writeln!(
            f,
            "Effective power:        {:.2} kW per station",
            self.effective_power_per_station_kw
        )?;
        writeln!(
            f,
            "Station capacity:       {:.2} kWh/day",
            self.station_capacity_kwh_per_day
        )?;
        writeln!(
            f,
            "Estimated swap stations required: {:.2}",
            self.required_stations
        )?;
        write!(f, "Stations to provision:  {}", self.stations_to_provision())
    }
}
