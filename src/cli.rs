//! Command-line interface.

use std::path::{Path, PathBuf};

use ::log::{debug, info, warn};
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::ScenarioConfig;
use crate::io::export::export_csv;
use crate::log;
use crate::sizing::{EstimationParameters, StationEstimator};

/// Estimate how many battery-swap stations a fleet needs.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the scenario comes from. Neither flag means the `baseline` preset.
#[derive(Debug, Args)]
pub struct ScenarioSource {
    /// Load scenario from a TOML config file
    #[arg(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,
    /// Use a built-in preset (baseline, round_the_clock, fast_charge)
    #[arg(long)]
    pub preset: Option<String>,
}

impl ScenarioSource {
    /// Loads and validates the selected scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed, the preset is unknown,
    /// or validation fails.
    pub fn load(&self) -> Result<ScenarioConfig> {
        let scenario = if let Some(path) = &self.scenario {
            ScenarioConfig::from_toml_file(path)?
        } else {
            ScenarioConfig::from_preset(self.preset.as_deref().unwrap_or("baseline"))?
        };

        let errors = scenario.validate();
        if !errors.is_empty() {
            let lines: Vec<String> = errors.iter().map(ToString::to_string).collect();
            bail!("invalid scenario:\n{}", lines.join("\n"));
        }
        Ok(scenario)
    }

    fn describe(&self) -> String {
        match (&self.scenario, &self.preset) {
            (Some(path), _) => format!("scenario file {}", path.display()),
            (None, Some(name)) => format!("preset \"{name}\""),
            (None, None) => "preset \"baseline\"".to_string(),
        }
    }
}

/// Output format for the assumption dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    Json,
    Toml,
}

/// The available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Estimate the number of swap stations required.
    Estimate {
        #[command(flatten)]
        source: ScenarioSource,
        /// Override a fleet count, e.g. `--fleet 2W=1200` (repeatable)
        #[arg(long = "fleet", value_name = "TYPE=COUNT", value_parser = parse_fleet_entry)]
        fleet: Vec<(String, u64)>,
        /// Station utilization in percent (clamped to 0..=100)
        #[arg(long, value_name = "PCT", value_parser = parse_pct)]
        utilization: Option<f64>,
        /// Share of vehicles running daily in percent (clamped to 0..=100)
        #[arg(long, value_name = "PCT", value_parser = parse_pct)]
        running: Option<f64>,
        /// Export the per-class breakdown to CSV
        #[arg(long, value_name = "PATH")]
        report_out: Option<PathBuf>,
    },
    /// Print the assumption table.
    Assumptions {
        #[command(flatten)]
        source: ScenarioSource,
        /// Output format
        #[arg(long, value_enum, default_value_t = DumpFormat::Json)]
        format: DumpFormat,
    },
    /// List built-in presets.
    Presets,
    /// Serve the estimator over HTTP (requires the `api` feature).
    Serve {
        #[command(flatten)]
        source: ScenarioSource,
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub fn execute(self) -> Result<()> {
        match self {
            Self::Estimate {
                source,
                fleet,
                utilization,
                running,
                report_out,
            } => handle_estimate_command(
                &source,
                &fleet,
                utilization,
                running,
                report_out.as_deref(),
            ),
            Self::Assumptions { source, format } => handle_assumptions_command(&source, format),
            Self::Presets => {
                for name in ScenarioConfig::PRESETS {
                    println!("{name}");
                }
                Ok(())
            }
            Self::Serve { source, port } => handle_serve_command(&source, port),
        }
    }
}

/// Parse CLI arguments and run the selected command.
///
/// # Errors
///
/// Returns an error if the command fails.
pub fn run_cli() -> Result<()> {
    Cli::parse().command.execute()
}

fn load_and_init_logger(source: &ScenarioSource) -> Result<ScenarioConfig> {
    let scenario = source.load()?;
    log::init(Some(&scenario.logging.level)).context("Failed to initialise logging.")?;
    debug!("Loaded {}", source.describe());
    Ok(scenario)
}

/// Handle the `estimate` command.
fn handle_estimate_command(
    source: &ScenarioSource,
    fleet_overrides: &[(String, u64)],
    utilization: Option<f64>,
    running: Option<f64>,
    report_out: Option<&Path>,
) -> Result<()> {
    let mut scenario = load_and_init_logger(source)?;
    info!("Estimating with {}", source.describe());

    for (vehicle_type, count) in fleet_overrides {
        scenario.fleet.insert(vehicle_type.clone(), *count);
    }

    let requested = EstimationParameters {
        utilization_pct: utilization.unwrap_or(scenario.parameters.utilization_pct),
        running_pct: running.unwrap_or(scenario.parameters.running_pct),
    };
    let params = requested.clamped();
    if params != requested {
        warn!(
            "Percentages clamped to [0, 100]: utilization {}% -> {}%, running {}% -> {}%",
            requested.utilization_pct,
            params.utilization_pct,
            requested.running_pct,
            params.running_pct
        );
    }

    for vehicle_type in scenario.unknown_fleet_types() {
        warn!("No assumptions for vehicle type \"{vehicle_type}\"; it will be ignored");
    }

    let estimator = StationEstimator::new(scenario.assumptions());
    let breakdown = estimator
        .breakdown(&scenario.fleet_input(), &params)
        .context("Estimation failed.")?;

    println!("{breakdown}");

    if let Some(path) = report_out {
        export_csv(&breakdown, path)
            .with_context(|| format!("Failed to write CSV report: {}", path.display()))?;
        info!("Breakdown written to {}", path.display());
    }

    Ok(())
}

/// Handle the `assumptions` command.
fn handle_assumptions_command(source: &ScenarioSource, format: DumpFormat) -> Result<()> {
    let scenario = load_and_init_logger(source)?;
    let table = scenario.assumptions();
    let dump = match format {
        DumpFormat::Json => table.to_json()?,
        DumpFormat::Toml => table.to_toml()?,
    };
    println!("{dump}");
    Ok(())
}

/// Handle the `serve` command.
#[cfg(feature = "api")]
fn handle_serve_command(source: &ScenarioSource, port: u16) -> Result<()> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let scenario = load_and_init_logger(source)?;
    info!("Serving {}", source.describe());

    let state = Arc::new(crate::api::AppState {
        estimator: StationEstimator::new(scenario.assumptions()),
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime.")?;
    rt.block_on(crate::api::serve(state, addr))
        .with_context(|| format!("API server on {addr} failed"))
}

#[cfg(not(feature = "api"))]
fn handle_serve_command(_source: &ScenarioSource, _port: u16) -> Result<()> {
    bail!("this build does not include the HTTP API; rebuild with `--features api`")
}

/// Parses `TYPE=COUNT`.
fn parse_fleet_entry(s: &str) -> Result<(String, u64), String> {
    let (vehicle_type, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TYPE=COUNT, got \"{s}\""))?;
    let vehicle_type = vehicle_type.trim();
    if vehicle_type.is_empty() {
        return Err(format!("missing vehicle type in \"{s}\""));
    }
    let count = count
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid count in \"{s}\": {e}"))?;
    Ok((vehicle_type.to_string(), count))
}

fn parse_pct(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|e| format!("invalid percentage \"{s}\": {e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("percentage must be finite, got \"{s}\""))
    }
}
