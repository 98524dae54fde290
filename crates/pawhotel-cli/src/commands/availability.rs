//! Free unit listing.

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pawhotel_core::error::AppError;
use pawhotel_core::types::{AnimalId, ReservationId};
use pawhotel_entity::kennel::AccommodationType;

use super::Services;

/// Arguments for the availability command
#[derive(Debug, Args)]
pub struct AvailabilityArgs {
    /// Accommodation type
    pub accommodation_type: AccommodationType,
    /// First night (YYYY-MM-DD)
    pub checkin: NaiveDate,
    /// Departure day (YYYY-MM-DD)
    pub checkout: NaiveDate,
    /// Check species compatibility for this animal first
    #[arg(long)]
    pub animal: Option<AnimalId>,
    /// Ignore this reservation (when moving it)
    #[arg(long)]
    pub exclude: Option<ReservationId>,
}

#[derive(Debug, Serialize, Tabled)]
struct FreeUnitRow {
    #[tabled(rename = "type")]
    accommodation_type: String,
    number: i32,
}

/// Execute the availability command
pub async fn execute(
    args: &AvailabilityArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    let free = match args.animal {
        Some(animal_id) => {
            services
                .resolver
                .free_units_for_animal(
                    animal_id,
                    args.accommodation_type,
                    args.checkin,
                    args.checkout,
                    args.exclude,
                )
                .await?
        }
        None => {
            services
                .resolver
                .free_units(
                    args.accommodation_type,
                    args.checkin,
                    args.checkout,
                    args.exclude,
                )
                .await?
        }
    };

    let rows: Vec<FreeUnitRow> = free
        .into_iter()
        .map(|number| FreeUnitRow {
            accommodation_type: args.accommodation_type.to_string(),
            number,
        })
        .collect();
    output::print_list(&rows, format);
    Ok(())
}
