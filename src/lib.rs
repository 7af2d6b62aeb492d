//! Battery-swap station sizing for electric two- and three-wheeler fleets.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod io;
pub mod log;
/// Assumptions, inputs, estimator, and estimate results.
pub mod sizing;
