//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::process::{Command, Output};

use swap_sizer::sizing::{EstimationParameters, FleetInput, StationEstimator};

/// Reference fleet: 1000 two-wheelers and 500 three-wheelers.
pub fn reference_fleet() -> FleetInput {
    FleetInput::from([("2W", 1000), ("3W", 500)])
}

/// Reference parameters: 80% utilization, 70% running.
pub fn reference_params() -> EstimationParameters {
    EstimationParameters::new(80.0, 70.0)
}

/// Estimator over the standard assumption table.
pub fn standard_estimator() -> StationEstimator {
    StationEstimator::default()
}

/// Runs the binary with `args`, logging restricted to warnings.
pub fn run_bin(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_swap-sizer"))
        .args(args)
        .env("SWAP_SIZER_LOG_LEVEL", "warn")
        .output()
        .expect("swap-sizer process should run")
}

/// Extracts the numeric value following `label` on its output line.
pub fn parse_metric(stdout: &str, label: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid format for line `{line}`"));

    let numeric = raw.split_whitespace().next().unwrap_or(raw);
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from line `{line}`"))
}
