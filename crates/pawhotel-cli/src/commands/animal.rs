//! Animal commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use pawhotel_core::error::AppError;
use pawhotel_core::types::AnimalId;
use pawhotel_entity::animal::{CreateAnimal, Species};
use pawhotel_service::RequestContext;

use super::Services;

/// Arguments for animal commands
#[derive(Debug, Args)]
pub struct AnimalArgs {
    /// Animal subcommand
    #[command(subcommand)]
    pub command: AnimalCommand,
}

/// Animal subcommands
#[derive(Debug, Subcommand)]
pub enum AnimalCommand {
    /// Register a guest animal
    Add {
        /// Name
        name: String,
        /// Species (dog, cat)
        species: Species,
        /// Breed
        #[arg(long)]
        breed: Option<String>,
        /// Owner name
        #[arg(long)]
        owner: Option<String>,
    },
    /// Show an animal
    Show {
        /// Animal ID
        id: AnimalId,
    },
}

/// Execute animal commands
pub async fn execute(
    args: &AnimalArgs,
    services: &Services,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        AnimalCommand::Add {
            name,
            species,
            breed,
            owner,
        } => {
            let animal = services
                .animals
                .register(
                    ctx,
                    CreateAnimal {
                        name: name.clone(),
                        species: *species,
                        breed: breed.clone(),
                        owner_name: owner.clone(),
                    },
                )
                .await?;
            output::print_success(&format!("Registered {} ({})", animal.name, animal.id));
        }
        AnimalCommand::Show { id } => {
            let animal = services.animals.get(*id).await?;
            output::print_item(&animal, format);
        }
    }
    Ok(())
}
