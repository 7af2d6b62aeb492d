//! Battery-swap station sizing: assumptions, inputs, estimator, and results.

pub mod assumptions;
pub mod estimator;
pub mod fleet;
pub mod report;

pub use assumptions::{AssumptionTable, GlobalAssumptions, VehicleClassAssumptions};
pub use estimator::{EstimateError, StationEstimator};
pub use fleet::{EstimationParameters, FleetInput};
pub use report::{ClassDemand, EstimateBreakdown};
