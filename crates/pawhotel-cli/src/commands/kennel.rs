//! Kennel unit commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pawhotel_core::error::AppError;
use pawhotel_entity::kennel::AccommodationType;
use pawhotel_service::RequestContext;

use super::Services;

/// Arguments for kennel commands
#[derive(Debug, Args)]
pub struct KennelArgs {
    /// Kennel subcommand
    #[command(subcommand)]
    pub command: KennelCommand,
}

/// Kennel subcommands
#[derive(Debug, Subcommand)]
pub enum KennelCommand {
    /// Provision a unit
    Add {
        /// Accommodation type (indoor, outdoor, cattery)
        accommodation_type: AccommodationType,
        /// Unit number
        number: i32,
        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List units
    List {
        /// Only this accommodation type
        #[arg(short = 't', long = "type")]
        accommodation_type: Option<AccommodationType>,
    },
    /// Change a unit's description
    Describe {
        /// Accommodation type
        accommodation_type: AccommodationType,
        /// Unit number
        number: i32,
        /// New description
        description: String,
    },
}

/// Kennel display row for table output
#[derive(Debug, Serialize, Tabled)]
struct KennelRow {
    #[tabled(rename = "type")]
    accommodation_type: String,
    number: i32,
    description: String,
    created_at: String,
}

/// Execute kennel commands
pub async fn execute(
    args: &KennelArgs,
    services: &Services,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        KennelCommand::Add {
            accommodation_type,
            number,
            description,
        } => {
            services
                .kennels
                .add_unit(ctx, *accommodation_type, *number, description.clone())
                .await?;
            output::print_success(&format!("Kennel {accommodation_type} #{number} added"));
        }
        KennelCommand::List { accommodation_type } => {
            let rows: Vec<KennelRow> = services
                .kennels
                .list(*accommodation_type)
                .await?
                .into_iter()
                .map(|u| KennelRow {
                    accommodation_type: u.accommodation_type.to_string(),
                    number: u.number,
                    description: u.description,
                    created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        KennelCommand::Describe {
            accommodation_type,
            number,
            description,
        } => {
            services
                .kennels
                .describe(ctx, *accommodation_type, *number, description)
                .await?;
            output::print_success(&format!("Kennel {accommodation_type} #{number} updated"));
        }
    }
    Ok(())
}
