//! Occupancy dashboard command.

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pawhotel_core::error::AppError;

use super::Services;

/// Arguments for the occupancy command
#[derive(Debug, Args)]
pub struct OccupancyArgs {
    /// Night to report (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Tabled)]
struct OccupancyTableRow {
    #[tabled(rename = "type")]
    accommodation_type: String,
    total: usize,
    occupied: usize,
    free: usize,
}

/// Execute the occupancy command
pub async fn execute(
    args: &OccupancyArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let rows: Vec<OccupancyTableRow> = services
        .occupancy
        .snapshot(date)
        .await?
        .into_iter()
        .map(|row| OccupancyTableRow {
            accommodation_type: row.accommodation_type.to_string(),
            total: row.total_units,
            occupied: row.occupied,
            free: row.free,
        })
        .collect();

    if format == OutputFormat::Table {
        println!("Occupancy for the night of {date}");
    }
    output::print_list(&rows, format);
    Ok(())
}
