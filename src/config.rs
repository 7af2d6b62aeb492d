//! TOML-based scenario configuration and preset definitions.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::log::LOG_LEVELS;
use crate::sizing::{
    AssumptionTable, EstimationParameters, FleetInput, GlobalAssumptions, VehicleClassAssumptions,
};

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults matching the baseline assumption set and the
/// reference fleet. Load from TOML with [`ScenarioConfig::from_toml_file`]
/// or use [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Station-level constants.
    #[serde(default)]
    pub station: StationConfig,
    /// Assumptions per vehicle type. Replaces the default classes when given.
    #[serde(default = "default_vehicles")]
    pub vehicles: BTreeMap<String, VehicleClassConfig>,
    /// Vehicle counts per type.
    #[serde(default = "default_fleet")]
    pub fleet: BTreeMap<String, u64>,
    /// Utilization and running share.
    #[serde(default)]
    pub parameters: ParametersConfig,
    /// Logger settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Station-level constants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StationConfig {
    /// Hours per day the station operates (0, 24].
    pub operational_hours: f64,
    /// Charging power per port (kW).
    pub charging_speed_kw: f64,
    /// Charging ports per station.
    pub ports_per_station: u32,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            operational_hours: 16.0,
            charging_speed_kw: 6.0,
            ports_per_station: 10,
        }
    }
}

/// Swap behaviour for one vehicle type.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleClassConfig {
    /// Energy delivered per swap (kWh).
    pub energy_per_swap_kwh: f64,
    /// Swaps per running vehicle per day.
    pub swaps_per_day_per_vehicle: f64,
}

fn default_vehicles() -> BTreeMap<String, VehicleClassConfig> {
    BTreeMap::from([
        (
            "2W".to_string(),
            VehicleClassConfig {
                energy_per_swap_kwh: 1.5,
                swaps_per_day_per_vehicle: 1.2,
            },
        ),
        (
            "3W".to_string(),
            VehicleClassConfig {
                energy_per_swap_kwh: 3.0,
                swaps_per_day_per_vehicle: 1.0,
            },
        ),
    ])
}

fn default_fleet() -> BTreeMap<String, u64> {
    BTreeMap::from([("2W".to_string(), 1000), ("3W".to_string(), 500)])
}

/// Utilization and running share, in percent.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    /// Station utilization (%).
    pub utilization_pct: f64,
    /// Share of the fleet running daily (%).
    pub running_pct: f64,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            utilization_pct: 80.0,
            running_pct: 70.0,
        }
    }
}

/// Logger settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::log::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"station.ports_per_station"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Strictly positive; NaN is not.
fn is_positive(value: f64) -> bool {
    value > 0.0
}

impl ScenarioConfig {
    /// Returns the baseline scenario: standard assumptions and reference fleet.
    pub fn baseline() -> Self {
        Self {
            station: StationConfig::default(),
            vehicles: default_vehicles(),
            fleet: default_fleet(),
            parameters: ParametersConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Returns the round-the-clock preset: stations open 24 hours.
    pub fn round_the_clock() -> Self {
        Self {
            station: StationConfig {
                operational_hours: 24.0,
                ..StationConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the fast-charge preset: more, faster ports per station.
    pub fn fast_charge() -> Self {
        Self {
            station: StationConfig {
                charging_speed_kw: 10.0,
                ports_per_station: 12,
                ..StationConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "round_the_clock", "fast_charge"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "round_the_clock" => Ok(Self::round_the_clock()),
            "fast_charge" => Ok(Self::fast_charge()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Fleet entries for vehicle types without assumptions are not errors;
    /// see [`ScenarioConfig::unknown_fleet_types`].
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let st = &self.station;
        if !is_positive(st.operational_hours) || st.operational_hours > 24.0 {
            errors.push(ConfigError::new(
                "station.operational_hours",
                "must be in (0, 24]",
            ));
        }
        if !is_positive(st.charging_speed_kw) {
            errors.push(ConfigError::new("station.charging_speed_kw", "must be > 0"));
        }
        if st.ports_per_station == 0 {
            errors.push(ConfigError::new("station.ports_per_station", "must be > 0"));
        }

        for (vehicle_type, class) in &self.vehicles {
            if !is_positive(class.energy_per_swap_kwh) {
                errors.push(ConfigError::new(
                    format!("vehicles.{vehicle_type}.energy_per_swap_kwh"),
                    "must be > 0",
                ));
            }
            if !is_positive(class.swaps_per_day_per_vehicle) {
                errors.push(ConfigError::new(
                    format!("vehicles.{vehicle_type}.swaps_per_day_per_vehicle"),
                    "must be > 0",
                ));
            }
        }

        let p = &self.parameters;
        if !(0.0..=100.0).contains(&p.utilization_pct) {
            errors.push(ConfigError::new(
                "parameters.utilization_pct",
                "must be in [0, 100]",
            ));
        }
        if !(0.0..=100.0).contains(&p.running_pct) {
            errors.push(ConfigError::new(
                "parameters.running_pct",
                "must be in [0, 100]",
            ));
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigError::new(
                "logging.level",
                format!(
                    "must be one of {}, got \"{}\"",
                    LOG_LEVELS.join(", "),
                    self.logging.level
                ),
            ));
        }

        errors
    }

    /// Fleet vehicle types that have no entry under `vehicles`.
    pub fn unknown_fleet_types(&self) -> Vec<&str> {
        self.fleet
            .keys()
            .filter(|t| !self.vehicles.contains_key(*t))
            .map(String::as_str)
            .collect()
    }

    /// Builds the immutable assumption table for this scenario.
    pub fn assumptions(&self) -> AssumptionTable {
        AssumptionTable::new(
            self.vehicles.iter().map(|(t, c)| {
                (
                    t.clone(),
                    VehicleClassAssumptions::new(c.energy_per_swap_kwh, c.swaps_per_day_per_vehicle),
                )
            }),
            GlobalAssumptions {
                station_operational_hours: self.station.operational_hours,
                charging_speed_kw: self.station.charging_speed_kw,
                ports_per_station: self.station.ports_per_station,
            },
        )
    }

    pub fn fleet_input(&self) -> FleetInput {
        self.fleet.iter().map(|(t, &n)| (t.as_str(), n)).collect()
    }

    pub fn parameters(&self) -> EstimationParameters {
        EstimationParameters::new(self.parameters.utilization_pct, self.parameters.running_pct)
    }
}
