//! CSV export for estimate breakdowns.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sizing::EstimateBreakdown;

/// Column header for the per-class CSV export.
const HEADER: [&str; 4] = ["vehicle_type", "vehicles", "daily_swaps", "energy_kwh"];

/// Label of the trailing summary row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// Exports an estimate breakdown to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(breakdown: &EstimateBreakdown, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(breakdown, buf)
}

/// Writes one row per recognised vehicle class followed by a `TOTAL` row.
///
/// Output is deterministic for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(breakdown: &EstimateBreakdown, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER)?;

    for c in &breakdown.classes {
        wtr.write_record(&[
            c.vehicle_type.clone(),
            c.vehicles.to_string(),
            format!("{:.4}", c.daily_swaps),
            format!("{:.4}", c.energy_kwh),
        ])?;
    }

    let total_vehicles: u64 = breakdown.classes.iter().map(|c| c.vehicles).sum();
    wtr.write_record(&[
        TOTAL_LABEL.to_string(),
        total_vehicles.to_string(),
        format!("{:.4}", breakdown.total_daily_swaps()),
        format!("{:.4}", breakdown.total_energy_kwh),
    ])?;

    wtr.flush()?;
    Ok(())
}
