//! Converts fleet-level daily energy demand into a required-station count.

use thiserror::Error;

use super::assumptions::AssumptionTable;
use super::fleet::{EstimationParameters, FleetInput};
use super::report::{ClassDemand, EstimateBreakdown};

/// Hours in a day; used both for the operating-hours derate and daily capacity.
const HOURS_PER_DAY: f64 = 24.0;

/// Failure modes of an estimation call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// Station daily energy capacity evaluated to zero, leaving the station
    /// count undefined.
    #[error(
        "invalid configuration: station daily capacity is zero \
         (utilization {utilization_pct}%, {station_operational_hours} operational hours, \
         {charging_speed_kw} kW per port, {ports_per_station} ports)"
    )]
    InvalidConfiguration {
        /// Utilization supplied by the caller (%).
        utilization_pct: f64,
        /// Station opening hours in effect.
        station_operational_hours: f64,
        /// Power per port in effect (kW).
        charging_speed_kw: f64,
        /// Ports per station in effect.
        ports_per_station: u32,
    },
}

/// Stateless station-count estimator bound to one assumption table.
///
/// # Examples
///
/// ```
/// use swap_sizer::sizing::{EstimationParameters, FleetInput, StationEstimator};
///
/// let estimator = StationEstimator::default();
/// let fleet = FleetInput::from([("2W", 1000), ("3W", 500)]);
/// let stations = estimator
///     .estimate(&fleet, &EstimationParameters::new(80.0, 70.0))
///     .unwrap();
/// assert_eq!(stations, 3.01);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationEstimator {
    assumptions: AssumptionTable,
}

impl StationEstimator {
    pub fn new(assumptions: AssumptionTable) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &AssumptionTable {
        &self.assumptions
    }

    /// Continuous number of stations needed, rounded to 2 decimals.
    ///
    /// Unknown vehicle types in `fleet` are skipped. Percentages are used
    /// as given; out-of-range values scale the result arithmetically.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidConfiguration`] when the station
    /// daily capacity is zero.
    pub fn estimate(
        &self,
        fleet: &FleetInput,
        params: &EstimationParameters,
    ) -> Result<f64, EstimateError> {
        Ok(self.breakdown(fleet, params)?.required_stations)
    }

    /// Same computation as [`estimate`](Self::estimate), keeping every
    /// intermediate quantity.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidConfiguration`] when the station
    /// daily capacity is zero.
    pub fn breakdown(
        &self,
        fleet: &FleetInput,
        params: &EstimationParameters,
    ) -> Result<EstimateBreakdown, EstimateError> {
        let running = params.running_fraction();

        let mut classes = Vec::with_capacity(fleet.len());
        let mut ignored_vehicle_types = Vec::new();
        let mut total_energy_kwh = 0.0;

        for (vehicle_type, count) in fleet.iter() {
            let Some(class) = self.assumptions.vehicle(vehicle_type) else {
                ignored_vehicle_types.push(vehicle_type.to_string());
                continue;
            };
            let daily_swaps = count as f64 * running * class.swaps_per_day_per_vehicle;
            let energy_kwh = daily_swaps * class.energy_per_swap_kwh;
            total_energy_kwh += energy_kwh;
            classes.push(ClassDemand {
                vehicle_type: vehicle_type.to_string(),
                vehicles: count,
                daily_swaps,
                energy_kwh,
            });
        }

        let effective_power_per_station_kw = self.effective_power_per_station_kw(params);
        let station_capacity_kwh_per_day = effective_power_per_station_kw * HOURS_PER_DAY;

        if station_capacity_kwh_per_day == 0.0 {
            let global = self.assumptions.global();
            return Err(EstimateError::InvalidConfiguration {
                utilization_pct: params.utilization_pct,
                station_operational_hours: global.station_operational_hours,
                charging_speed_kw: global.charging_speed_kw,
                ports_per_station: global.ports_per_station,
            });
        }

        Ok(EstimateBreakdown {
            classes,
            ignored_vehicle_types,
            total_energy_kwh,
            effective_power_per_station_kw,
            station_capacity_kwh_per_day,
            required_stations: round_to_cents(total_energy_kwh / station_capacity_kwh_per_day),
        })
    }

    /// Nameplate station power derated by utilization and the share of the
    /// day the station is open (kW).
    pub fn effective_power_per_station_kw(&self, params: &EstimationParameters) -> f64 {
        let global = self.assumptions.global();
        global.nameplate_power_kw()
            * params.utilization_fraction()
            * (global.station_operational_hours / HOURS_PER_DAY)
    }
}

/// Rounds half away from zero to 2 decimal places.
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    use super::*;
    use crate::sizing::assumptions::{GlobalAssumptions, VehicleClassAssumptions};

    fn reference_fleet() -> FleetInput {
        FleetInput::from([("2W", 1000), ("3W", 500)])
    }

    #[test]
    fn reference_scenario() {
        let estimator = StationEstimator::default();
        let breakdown = estimator
            .breakdown(&reference_fleet(), &EstimationParameters::new(80.0, 70.0))
            .expect("reference scenario should estimate");

        assert_approx_eq!(f64, breakdown.classes[0].energy_kwh, 1260.0, epsilon = 1e-9);
        assert_approx_eq!(f64, breakdown.classes[1].energy_kwh, 1050.0, epsilon = 1e-9);
        assert_approx_eq!(f64, breakdown.total_energy_kwh, 2310.0, epsilon = 1e-9);
        assert_approx_eq!(f64, breakdown.effective_power_per_station_kw, 32.0, epsilon = 1e-9);
        assert_approx_eq!(f64, breakdown.station_capacity_kwh_per_day, 768.0, epsilon = 1e-9);
        assert_eq!(breakdown.required_stations, 3.01);
        assert_eq!(breakdown.stations_to_provision(), 4);
    }

    #[test]
    fn empty_fleet_needs_no_stations() {
        let estimator = StationEstimator::default();
        let stations = estimator.estimate(&FleetInput::new(), &EstimationParameters::new(80.0, 70.0));
        assert_eq!(stations, Ok(0.0));
    }

    #[test]
    fn unknown_types_are_ignored() {
        let estimator = StationEstimator::default();
        let params = EstimationParameters::new(80.0, 70.0);
        let breakdown = estimator
            .breakdown(&FleetInput::from([("4W", 100)]), &params)
            .expect("unknown types should not fail");
        assert_eq!(breakdown.required_stations, 0.0);
        assert!(breakdown.classes.is_empty());
        assert_eq!(breakdown.ignored_vehicle_types, vec!["4W".to_string()]);
    }

    #[test]
    fn mixed_known_and_unknown_types() {
        let estimator = StationEstimator::default();
        let params = EstimationParameters::new(80.0, 70.0);
        let with_unknown = estimator.estimate(
            &FleetInput::from([("2W", 1000), ("3W", 500), ("bus", 40)]),
            &params,
        );
        let without = estimator.estimate(&reference_fleet(), &params);
        assert_eq!(with_unknown, without);
    }

    #[rstest]
    #[case(0.0, 70.0)]
    #[case(0.0, 0.0)]
    fn zero_utilization_is_invalid(#[case] utilization: f64, #[case] running: f64) {
        let estimator = StationEstimator::default();
        let result = estimator.estimate(
            &reference_fleet(),
            &EstimationParameters::new(utilization, running),
        );
        assert!(matches!(
            result,
            Err(EstimateError::InvalidConfiguration { utilization_pct, .. }) if utilization_pct == 0.0
        ));
    }

    #[test]
    fn zero_capacity_is_invalid_even_for_empty_fleet() {
        let estimator = StationEstimator::default();
        let result = estimator.estimate(&FleetInput::new(), &EstimationParameters::new(0.0, 70.0));
        assert!(result.is_err());
    }

    #[rstest]
    #[case::no_hours(0.0, 6.0, 10)]
    #[case::no_power(16.0, 0.0, 10)]
    #[case::no_ports(16.0, 6.0, 0)]
    fn zero_station_constants_are_invalid(
        #[case] hours: f64,
        #[case] speed: f64,
        #[case] ports: u32,
    ) {
        let table = AssumptionTable::new(
            [("2W".to_string(), VehicleClassAssumptions::new(1.5, 1.2))],
            GlobalAssumptions {
                station_operational_hours: hours,
                charging_speed_kw: speed,
                ports_per_station: ports,
            },
        );
        let result = StationEstimator::new(table)
            .estimate(&FleetInput::from([("2W", 10)]), &EstimationParameters::new(80.0, 70.0));
        assert!(matches!(result, Err(EstimateError::InvalidConfiguration { .. })));
    }

    #[test]
    fn error_message_names_the_station_constants() {
        let err = StationEstimator::default()
            .estimate(&reference_fleet(), &EstimationParameters::new(0.0, 70.0))
            .expect_err("zero utilization should fail");
        let msg = err.to_string();
        assert!(msg.contains("station daily capacity is zero"));
        assert!(msg.contains("16 operational hours"));
        assert!(msg.contains("10 ports"));
    }

    #[test]
    fn linear_in_vehicle_count() {
        let estimator = StationEstimator::default();
        let params = EstimationParameters::new(80.0, 70.0);
        let one = estimator
            .breakdown(&FleetInput::from([("2W", 1000)]), &params)
            .expect("estimate");
        let three = estimator
            .breakdown(&FleetInput::from([("2W", 3000)]), &params)
            .expect("estimate");
        assert_approx_eq!(
            f64,
            three.total_energy_kwh,
            3.0 * one.total_energy_kwh,
            epsilon = 1e-9
        );
    }

    #[test]
    fn out_of_range_percentages_propagate() {
        let estimator = StationEstimator::default();
        let fleet = reference_fleet();
        let nominal = estimator
            .breakdown(&fleet, &EstimationParameters::new(80.0, 70.0))
            .expect("estimate");
        let doubled = estimator
            .breakdown(&fleet, &EstimationParameters::new(80.0, 140.0))
            .expect("estimate");
        assert_approx_eq!(
            f64,
            doubled.total_energy_kwh,
            2.0 * nominal.total_energy_kwh,
            epsilon = 1e-9
        );

        let negative = estimator
            .estimate(&fleet, &EstimationParameters::new(-80.0, 70.0))
            .expect("negative utilization is not rejected");
        assert_eq!(negative, -3.01);
    }

    #[rstest]
    #[case(0.004, 0.0)]
    #[case(0.005, 0.01)]
    #[case(1.234_9, 1.23)]
    #[case(-0.005, -0.01)]
    fn rounding_to_cents(#[case] value: f64, #[case] expected: f64) {
        assert_eq!(round_to_cents(value), expected);
    }
}
