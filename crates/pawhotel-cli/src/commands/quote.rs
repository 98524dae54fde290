//! Price a stay without booking.

use chrono::NaiveDate;
use clap::Args;

use crate::output::{self, OutputFormat};
use pawhotel_core::error::AppError;
use pawhotel_core::types::{AnimalId, Money};
use pawhotel_entity::kennel::AccommodationType;
use pawhotel_service::{AddOnRequest, QuoteRequest};

use super::Services;

/// Add-on flags shared by quote and booking commands
#[derive(Debug, Clone, Args)]
pub struct AddOnArgs {
    /// Add transport
    #[arg(long)]
    pub transport: bool,
    /// Transport fee (defaults to the configured fee)
    #[arg(long, requires = "transport")]
    pub transport_value: Option<Money>,
    /// Add a bath
    #[arg(long)]
    pub bath: bool,
    /// Bath fee (defaults to the configured fee)
    #[arg(long, requires = "bath")]
    pub bath_value: Option<Money>,
}

impl AddOnArgs {
    /// Transport request.
    pub fn transport(&self) -> AddOnRequest {
        AddOnRequest {
            enabled: self.transport,
            value: self.transport_value,
        }
    }

    /// Bath request.
    pub fn bath(&self) -> AddOnRequest {
        AddOnRequest {
            enabled: self.bath,
            value: self.bath_value,
        }
    }
}

/// Arguments for the quote command
#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Guest animal
    pub animal: AnimalId,
    /// Accommodation type
    pub accommodation_type: AccommodationType,
    /// First night (YYYY-MM-DD)
    pub checkin: NaiveDate,
    /// Departure day (YYYY-MM-DD)
    pub checkout: NaiveDate,
    /// Also check this unit
    #[arg(short, long)]
    pub number: Option<i32>,
    /// Nightly rate (defaults by species)
    #[arg(long)]
    pub rate: Option<Money>,
    #[command(flatten)]
    pub add_ons: AddOnArgs,
}

/// Execute the quote command
pub async fn execute(
    args: &QuoteArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), AppError> {
    let quote = services
        .reservations
        .quote(QuoteRequest {
            animal_id: args.animal,
            accommodation_type: args.accommodation_type,
            kennel_number: args.number,
            checkin_date: args.checkin,
            checkout_date: args.checkout,
            daily_rate: args.rate,
            transport: args.add_ons.transport(),
            bath: args.add_ons.bath(),
        })
        .await?;

    match format {
        OutputFormat::Json => output::print_item(&quote, format),
        OutputFormat::Table => {
            let free: Vec<String> = quote.free_units.iter().map(i32::to_string).collect();
            let free = if free.is_empty() { "none".to_string() } else { free.join(", ") };
            output::print_kv("Type", quote.accommodation_type.as_str());
            output::print_kv("Free units", &free);
            if let Some(number) = quote.kennel_number {
                output::print_kv("Requested unit", &format!("#{number} (available)"));
            }
            output::print_kv("Daily rate", &quote.daily_rate.to_string());
            output::print_kv("Transport", &quote.transport.charge().to_string());
            output::print_kv("Bath", &quote.bath.charge().to_string());
            output::print_kv("Nights", &quote.total_days.to_string());
            output::print_kv("Total", &quote.total_value.to_string());
        }
    }
    Ok(())
}
