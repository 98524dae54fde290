//! Reservation lifecycle commands.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pawhotel_core::error::AppError;
use pawhotel_core::types::{AnimalId, Money, ReservationId};
use pawhotel_entity::kennel::AccommodationType;
use pawhotel_entity::reservation::{
    PaymentMethod, Reservation, ReservationFilter, ReservationStatus, StayDates,
};
use pawhotel_service::{
    AddOnRequest, CreateReservationRequest, RequestContext, UpdateReservationRequest,
};

use super::Services;
use super::quote::AddOnArgs;

/// Arguments for reservation commands
#[derive(Debug, Args)]
pub struct ReservationArgs {
    /// Reservation subcommand
    #[command(subcommand)]
    pub command: ReservationCommand,
}

/// Reservation subcommands
#[derive(Debug, Subcommand)]
pub enum ReservationCommand {
    /// Book a unit
    Book {
        /// Guest animal
        animal: AnimalId,
        /// Accommodation type
        accommodation_type: AccommodationType,
        /// Unit number
        number: i32,
        /// First night (YYYY-MM-DD)
        checkin: NaiveDate,
        /// Departure day (YYYY-MM-DD)
        checkout: NaiveDate,
        /// Nightly rate (defaults by species)
        #[arg(long)]
        rate: Option<Money>,
        /// Payment method
        #[arg(long, default_value = "cash")]
        payment: PaymentMethod,
        #[command(flatten)]
        add_ons: AddOnArgs,
    },
    /// Edit an active reservation
    Edit {
        /// Reservation ID
        id: ReservationId,
        /// New accommodation type
        #[arg(long = "type")]
        accommodation_type: Option<AccommodationType>,
        /// New unit number
        #[arg(long)]
        number: Option<i32>,
        /// New first night
        #[arg(long)]
        checkin: Option<NaiveDate>,
        /// New departure day
        #[arg(long)]
        checkout: Option<NaiveDate>,
        /// New nightly rate
        #[arg(long)]
        rate: Option<Money>,
        /// Transport on or off
        #[arg(long)]
        transport: Option<bool>,
        /// Transport fee (requires --transport)
        #[arg(long, requires = "transport")]
        transport_value: Option<Money>,
        /// Bath on or off
        #[arg(long)]
        bath: Option<bool>,
        /// Bath fee (requires --bath)
        #[arg(long, requires = "bath")]
        bath_value: Option<Money>,
        /// New payment method
        #[arg(long)]
        payment: Option<PaymentMethod>,
    },
    /// Check the guest out
    Checkout {
        /// Reservation ID
        id: ReservationId,
        /// Actual departure day (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Cancel an active reservation
    Cancel {
        /// Reservation ID
        id: ReservationId,
        /// Reason
        #[arg(long)]
        reason: Option<String>,
    },
    /// Delete a finished or cancelled reservation
    Delete {
        /// Reservation ID
        id: ReservationId,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Show one reservation
    Show {
        /// Reservation ID
        id: ReservationId,
    },
    /// List reservations
    List {
        /// Only this accommodation type
        #[arg(short = 't', long = "type")]
        accommodation_type: Option<AccommodationType>,
        /// Only this status
        #[arg(short, long)]
        status: Option<ReservationStatus>,
        /// Only stays overlapping from this day
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Only stays overlapping up to this day
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
}

/// Reservation display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ReservationRow {
    id: String,
    #[tabled(rename = "type")]
    accommodation_type: String,
    #[tabled(rename = "unit")]
    kennel_number: i32,
    checkin: String,
    checkout: String,
    nights: i32,
    total: String,
    status: String,
}

impl From<&Reservation> for ReservationRow {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.to_string(),
            accommodation_type: r.accommodation_type.to_string(),
            kennel_number: r.kennel_number,
            checkin: r.checkin_date.to_string(),
            checkout: r.checkout_date.to_string(),
            nights: r.total_days,
            total: r.total_value.to_string(),
            status: r.status.to_string(),
        }
    }
}

/// Execute reservation commands
pub async fn execute(
    args: &ReservationArgs,
    services: &Services,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let service = &services.reservations;

    match &args.command {
        ReservationCommand::Book {
            animal,
            accommodation_type,
            number,
            checkin,
            checkout,
            rate,
            payment,
            add_ons,
        } => {
            let reservation = service
                .create(
                    ctx,
                    CreateReservationRequest {
                        animal_id: *animal,
                        accommodation_type: *accommodation_type,
                        kennel_number: *number,
                        checkin_date: *checkin,
                        checkout_date: *checkout,
                        daily_rate: *rate,
                        transport: add_ons.transport(),
                        bath: add_ons.bath(),
                        payment_method: *payment,
                    },
                )
                .await?;
            output::print_success(&format!(
                "Booked {} #{} ({} nights, total {})",
                reservation.accommodation_type,
                reservation.kennel_number,
                reservation.total_days,
                reservation.total_value
            ));
            output::print_item(&reservation, format);
        }
        ReservationCommand::Edit {
            id,
            accommodation_type,
            number,
            checkin,
            checkout,
            rate,
            transport,
            transport_value,
            bath,
            bath_value,
            payment,
        } => {
            let req = UpdateReservationRequest {
                accommodation_type: *accommodation_type,
                kennel_number: *number,
                checkin_date: *checkin,
                checkout_date: *checkout,
                daily_rate: *rate,
                transport: add_on_change(*transport, *transport_value),
                bath: add_on_change(*bath, *bath_value),
                payment_method: *payment,
            };
            let reservation = service.update(ctx, *id, req).await?;
            output::print_success(&format!("Reservation {id} updated"));
            output::print_item(&reservation, format);
        }
        ReservationCommand::Checkout { id, date } => {
            let actual = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let reservation = service.checkout(ctx, *id, actual).await?;
            output::print_success(&format!(
                "Checked out: {} nights, total {}",
                reservation.total_days, reservation.total_value
            ));
        }
        ReservationCommand::Cancel { id, reason } => {
            service.cancel(ctx, *id, reason.clone()).await?;
            output::print_success(&format!("Reservation {id} cancelled"));
        }
        ReservationCommand::Delete { id, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Permanently delete reservation {id}?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            service.delete(ctx, *id).await?;
            output::print_success(&format!("Reservation {id} deleted"));
        }
        ReservationCommand::Show { id } => {
            let reservation = service.get(*id).await?;
            output::print_item(&reservation, format);
        }
        ReservationCommand::List {
            accommodation_type,
            status,
            from,
            to,
        } => {
            let filter = list_filter(*accommodation_type, *status, *from, *to)?;
            let rows: Vec<ReservationRow> = service
                .list(&filter)
                .await?
                .iter()
                .map(ReservationRow::from)
                .collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}

fn list_filter(
    accommodation_type: Option<AccommodationType>,
    status: Option<ReservationStatus>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<ReservationFilter, AppError> {
    let mut filter = ReservationFilter {
        accommodation_type,
        ..ReservationFilter::default()
    };
    if let Some(status) = status {
        filter = filter.with_status(status);
    }
    if let (Some(from), Some(to)) = (from, to) {
        filter = filter.overlapping(StayDates::new(from, to)?);
    }
    Ok(filter)
}

/// A fee alone never toggles an add-on; clap rejects `--*-value` without its switch.
fn add_on_change(enabled: Option<bool>, value: Option<Money>) -> Option<AddOnRequest> {
    enabled.map(|enabled| AddOnRequest { enabled, value })
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::commands::Cli;

    const ID: &str = "7d3f5a52-0c1e-4b8e-9a55-2f1d8c6e9b10";

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("date")
    }

    #[test]
    fn test_add_on_change_needs_switch() {
        assert!(add_on_change(None, None).is_none());
        assert!(add_on_change(None, Some(Money::from_cents(3000))).is_none());

        let on = add_on_change(Some(true), Some(Money::from_cents(3000))).expect("change");
        assert!(on.enabled);
        assert_eq!(on.value, Some(Money::from_cents(3000)));

        let off = add_on_change(Some(false), None).expect("change");
        assert!(!off.enabled);
    }

    #[test]
    fn test_edit_fee_without_switch_rejected() {
        let err = Cli::try_parse_from([
            "pawhotel",
            "reservation",
            "edit",
            ID,
            "--transport-value",
            "30",
        ])
        .expect_err("fee alone");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        assert!(
            Cli::try_parse_from([
                "pawhotel",
                "reservation",
                "edit",
                ID,
                "--transport",
                "true",
                "--transport-value",
                "30",
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_list_filter() {
        let all = list_filter(None, None, None, None).expect("filter");
        assert_eq!(all, ReservationFilter::default());

        let filter = list_filter(
            Some(AccommodationType::Cattery),
            Some(ReservationStatus::Cancelled),
            Some(d("2025-03-01")),
            Some(d("2025-03-05")),
        )
        .expect("filter");
        assert_eq!(filter.accommodation_type, Some(AccommodationType::Cattery));
        assert_eq!(filter.status, Some(ReservationStatus::Cancelled));
        assert_eq!(
            filter.date_range,
            Some(StayDates::new(d("2025-03-01"), d("2025-03-05")).expect("range"))
        );

        let err = list_filter(None, None, Some(d("2025-03-05")), Some(d("2025-03-01")))
            .expect_err("reversed");
        assert_eq!(err.kind, pawhotel_core::error::ErrorKind::InvalidRange);
    }
}
