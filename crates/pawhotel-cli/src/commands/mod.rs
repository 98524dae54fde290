//! CLI command definitions and dispatch.

pub mod animal;
pub mod availability;
pub mod kennel;
pub mod migrate;
pub mod occupancy;
pub mod quote;
pub mod reservation;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use pawhotel_core::config::AppConfig;
use pawhotel_core::error::AppError;
use pawhotel_database::DatabasePool;
use pawhotel_service::{
    AnimalService, AvailabilityResolver, EventPublisher, KennelService, OccupancyService,
    RateCard, RequestContext, ReservationService,
};

use crate::output::OutputFormat;

/// PawHotel: kennel availability and reservations
#[derive(Debug, Parser)]
#[command(name = "pawhotel", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Operator name recorded on writes
    #[arg(long, default_value = "cli")]
    pub operator: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Kennel unit provisioning
    Kennel(kennel::KennelArgs),
    /// Guest animal registration
    Animal(animal::AnimalArgs),
    /// List free kennel units for a stay
    Availability(availability::AvailabilityArgs),
    /// Price a stay without booking it
    Quote(quote::QuoteArgs),
    /// Reservation lifecycle
    Reservation(reservation::ReservationArgs),
    /// Per-type occupancy for one night
    Occupancy(occupancy::OccupancyArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let db = DatabasePool::connect(&config.database).await?;
        let ctx = RequestContext::new(&self.operator);

        let services = Services::build(&db, config);

        let result = match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &db).await,
            Commands::Kennel(args) => kennel::execute(args, &services, &ctx, self.format).await,
            Commands::Animal(args) => animal::execute(args, &services, &ctx, self.format).await,
            Commands::Availability(args) => {
                availability::execute(args, &services, self.format).await
            }
            Commands::Quote(args) => quote::execute(args, &services, self.format).await,
            Commands::Reservation(args) => {
                reservation::execute(args, &services, &ctx, self.format).await
            }
            Commands::Occupancy(args) => occupancy::execute(args, &services, self.format).await,
        };

        db.close().await;
        result
    }
}

/// Services wired over the PostgreSQL repositories.
pub struct Services {
    /// Kennel inventory.
    pub kennels: KennelService,
    /// Animal registry.
    pub animals: AnimalService,
    /// Availability queries.
    pub resolver: AvailabilityResolver,
    /// Reservation lifecycle.
    pub reservations: ReservationService,
    /// Occupancy dashboard.
    pub occupancy: OccupancyService,
}

impl Services {
    /// Wire services over `db`.
    pub fn build(db: &DatabasePool, config: &AppConfig) -> Self {
        let reservations = Arc::new(db.reservations());
        let kennels = Arc::new(db.kennels());
        let animals = Arc::new(db.animals());
        let events = EventPublisher::new();

        let resolver =
            AvailabilityResolver::new(reservations.clone(), kennels.clone(), animals.clone());

        Self {
            kennels: KennelService::new(kennels.clone(), events.clone()),
            animals: AnimalService::new(animals),
            reservations: ReservationService::new(
                resolver.clone(),
                reservations.clone(),
                reservations.clone(),
                RateCard::new(config.pricing.clone()),
                events,
            ),
            occupancy: OccupancyService::new(reservations, kennels),
            resolver,
        }
    }
}
