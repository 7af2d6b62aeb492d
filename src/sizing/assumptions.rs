//! Engineering assumptions behind the station estimate.
//!
//! An [`AssumptionTable`] is built once (from a preset or a scenario file)
//! and never mutated afterwards, so it can be shared freely between callers.

use std::collections::BTreeMap;

use serde::Serialize;

/// Per-vehicle-class swap behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleClassAssumptions {
    /// Energy delivered by one battery swap (kWh, > 0).
    #[serde(rename = "energy_per_swap_kWh")]
    pub energy_per_swap_kwh: f64,
    /// Average swaps per running vehicle per day (> 0).
    pub swaps_per_day_per_vehicle: f64,
}

impl VehicleClassAssumptions {
    pub fn new(energy_per_swap_kwh: f64, swaps_per_day_per_vehicle: f64) -> Self {
        Self {
            energy_per_swap_kwh,
            swaps_per_day_per_vehicle,
        }
    }
}

/// Station-level constants shared by every vehicle class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlobalAssumptions {
    /// Hours per day the station is open (0–24).
    pub station_operational_hours: f64,
    /// Charging power per port (kW, > 0).
    #[serde(rename = "charging_speed_kW")]
    pub charging_speed_kw: f64,
    /// Charging ports per station (> 0).
    pub ports_per_station: u32,
}

impl GlobalAssumptions {
    /// Nameplate charging power of a whole station (kW).
    pub fn nameplate_power_kw(&self) -> f64 {
        f64::from(self.ports_per_station) * self.charging_speed_kw
    }
}

/// Complete, immutable set of assumptions used by the estimator.
///
/// Serializes to a flat document where vehicle classes and global constants
/// sit side by side:
///
/// ```
/// use swap_sizer::sizing::assumptions::AssumptionTable;
///
/// let json = AssumptionTable::standard().to_json().unwrap();
/// assert!(json.contains("\"2W\""));
/// assert!(json.contains("\"ports_per_station\": 10"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssumptionTable {
    #[serde(flatten)]
    vehicles: BTreeMap<String, VehicleClassAssumptions>,
    #[serde(flatten)]
    global: GlobalAssumptions,
}

impl AssumptionTable {
    /// Builds a table from explicit vehicle classes and global constants.
    pub fn new(
        vehicles: impl IntoIterator<Item = (String, VehicleClassAssumptions)>,
        global: GlobalAssumptions,
    ) -> Self {
        Self {
            vehicles: vehicles.into_iter().collect(),
            global,
        }
    }

    /// The standard two- and three-wheeler assumption set.
    pub fn standard() -> Self {
        Self::new(
            [
                ("2W".to_string(), VehicleClassAssumptions::new(1.5, 1.2)),
                ("3W".to_string(), VehicleClassAssumptions::new(3.0, 1.0)),
            ],
            GlobalAssumptions {
                station_operational_hours: 16.0,
                charging_speed_kw: 6.0,
                ports_per_station: 10,
            },
        )
    }

    /// Looks up the assumptions for one vehicle type.
    pub fn vehicle(&self, vehicle_type: &str) -> Option<&VehicleClassAssumptions> {
        self.vehicles.get(vehicle_type)
    }

    /// Iterates vehicle classes in identifier order.
    pub fn vehicles(&self) -> impl Iterator<Item = (&str, &VehicleClassAssumptions)> {
        self.vehicles.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Recognised vehicle-type identifiers.
    pub fn vehicle_types(&self) -> impl Iterator<Item = &str> {
        self.vehicles.keys().map(String::as_str)
    }

    pub fn global(&self) -> &GlobalAssumptions {
        &self.global
    }

    /// Pretty-printed JSON dump of the table.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// TOML dump of the table.
    ///
    /// Global constants are emitted first since TOML requires plain keys to
    /// precede tables.
    ///
    /// # Errors
    ///
    /// Returns a `toml::ser::Error` if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        #[derive(Serialize)]
        struct Doc<'a> {
            #[serde(flatten)]
            global: &'a GlobalAssumptions,
            #[serde(flatten)]
            vehicles: &'a BTreeMap<String, VehicleClassAssumptions>,
        }

        toml::to_string(&Doc {
            global: &self.global,
            vehicles: &self.vehicles,
        })
    }
}

impl Default for AssumptionTable {
    fn default() -> Self {
        Self::standard()
    }
}
