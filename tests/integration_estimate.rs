//! Behavioural properties of the station estimator.

mod common;

use float_cmp::assert_approx_eq;
use rstest::rstest;
use swap_sizer::sizing::{
    AssumptionTable, EstimateError, EstimationParameters, FleetInput, GlobalAssumptions,
    StationEstimator, VehicleClassAssumptions,
};

#[test]
fn reference_scenario_needs_3_01_stations() {
    let estimator = common::standard_estimator();
    let breakdown = estimator
        .breakdown(&common::reference_fleet(), &common::reference_params())
        .expect("reference scenario should estimate");

    assert_approx_eq!(f64, breakdown.total_energy_kwh, 2310.0, epsilon = 1e-9);
    assert_approx_eq!(f64, breakdown.effective_power_per_station_kw, 32.0, epsilon = 1e-9);
    assert_approx_eq!(f64, breakdown.station_capacity_kwh_per_day, 768.0, epsilon = 1e-9);
    assert_eq!(breakdown.required_stations, 3.01);
}

#[rstest]
#[case(10.0, 10.0)]
#[case(80.0, 70.0)]
#[case(100.0, 100.0)]
fn empty_fleet_needs_zero_stations(#[case] utilization: f64, #[case] running: f64) {
    let stations = common::standard_estimator().estimate(
        &FleetInput::new(),
        &EstimationParameters::new(utilization, running),
    );
    assert_eq!(stations, Ok(0.0));
}

#[test]
fn unknown_vehicle_types_count_as_nothing() {
    let estimator = common::standard_estimator();
    let params = common::reference_params();
    let unknown = estimator.estimate(&FleetInput::from([("4W", 100)]), &params);
    let empty = estimator.estimate(&FleetInput::new(), &params);
    assert_eq!(unknown, Ok(0.0));
    assert_eq!(unknown, empty);
}

#[test]
fn energy_is_linear_in_vehicle_count() {
    let estimator = common::standard_estimator();
    let params = common::reference_params();
    let unit = estimator
        .breakdown(&FleetInput::from([("2W", 1)]), &params)
        .expect("estimate")
        .total_energy_kwh;

    for count in [0_u64, 7, 250, 10_000, 1_000_000] {
        let energy = estimator
            .breakdown(&FleetInput::from([("2W", count)]), &params)
            .expect("estimate")
            .total_energy_kwh;
        assert_approx_eq!(f64, energy, unit * count as f64, epsilon = 1e-6);
    }
}

#[test]
fn more_running_vehicles_never_need_fewer_stations() {
    let estimator = common::standard_estimator();
    let fleet = common::reference_fleet();
    let mut previous = f64::NEG_INFINITY;
    for running in (0..=100).step_by(5) {
        let stations = estimator
            .estimate(&fleet, &EstimationParameters::new(80.0, f64::from(running)))
            .expect("estimate");
        assert!(
            stations >= previous,
            "running {running}% gave {stations}, below {previous}"
        );
        previous = stations;
    }
}

#[test]
fn higher_utilization_never_needs_more_stations() {
    let estimator = common::standard_estimator();
    let fleet = common::reference_fleet();
    let mut previous = f64::INFINITY;
    for utilization in (5..=100).step_by(5) {
        let stations = estimator
            .estimate(&fleet, &EstimationParameters::new(f64::from(utilization), 70.0))
            .expect("estimate");
        assert!(
            stations <= previous,
            "utilization {utilization}% gave {stations}, above {previous}"
        );
        previous = stations;
    }
}

#[rstest]
#[case(FleetInput::from([("2W", 1)]))]
#[case(FleetInput::from([("3W", 500)]))]
#[case(common::reference_fleet())]
fn zero_utilization_is_invalid_configuration(#[case] fleet: FleetInput) {
    let result = common::standard_estimator().estimate(&fleet, &EstimationParameters::new(0.0, 70.0));
    assert!(matches!(
        result,
        Err(EstimateError::InvalidConfiguration { .. })
    ));
}

#[test]
fn result_always_has_at_most_two_decimals() {
    let estimator = common::standard_estimator();
    for count in [1_u64, 3, 17, 999, 123_457, 98_765_431] {
        for running in [13.0, 50.0, 77.7] {
            let stations = estimator
                .estimate(
                    &FleetInput::from([("2W", count), ("3W", count / 3)]),
                    &EstimationParameters::new(61.0, running),
                )
                .expect("estimate");
            let cents = stations * 100.0;
            assert!(
                (cents - cents.round()).abs() < 1e-6 * cents.abs().max(1.0),
                "{stations} is not rounded to 2 decimals"
            );
        }
    }
}

#[test]
fn alternate_assumption_table_changes_result_without_touching_core() {
    let regional = AssumptionTable::new(
        [
            ("2W".to_string(), VehicleClassAssumptions::new(1.5, 1.2)),
            ("3W".to_string(), VehicleClassAssumptions::new(3.0, 1.0)),
        ],
        GlobalAssumptions {
            station_operational_hours: 24.0,
            charging_speed_kw: 6.0,
            ports_per_station: 10,
        },
    );
    let stations = StationEstimator::new(regional)
        .estimate(&common::reference_fleet(), &common::reference_params())
        .expect("estimate");
    // capacity 10 * 6 * 0.8 * 24 = 1152 kWh/day; 2310 / 1152 = 2.005
    assert_eq!(stations, 2.01);
}

#[test]
fn estimator_is_shareable_across_threads() {
    let estimator = std::sync::Arc::new(common::standard_estimator());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let estimator = std::sync::Arc::clone(&estimator);
            std::thread::spawn(move || {
                estimator.estimate(&common::reference_fleet(), &common::reference_params())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().ok(), Some(Ok(3.01)));
    }
}
