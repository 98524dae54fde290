//! Animal entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pawhotel_core::types::AnimalId;

use super::species::Species;

/// A guest animal. Reservations reference it by id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Animal {
    /// Unique animal identifier.
    pub id: AnimalId,
    /// Call name.
    pub name: String,
    /// Species; decides which accommodation types are legal.
    pub species: Species,
    /// Breed (optional).
    pub breed: Option<String>,
    /// Owner's name (optional).
    pub owner_name: Option<String>,
    /// When the animal was registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to register a new animal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnimal {
    /// Call name.
    pub name: String,
    /// Species.
    pub species: Species,
    /// Breed (optional).
    pub breed: Option<String>,
    /// Owner's name (optional).
    pub owner_name: Option<String>,
}

impl CreateAnimal {
    /// Build the stored record with a fresh id.
    pub fn into_animal(self) -> Animal {
        Animal {
            id: AnimalId::new(),
            name: self.name,
            species: self.species,
            breed: self.breed,
            owner_name: self.owner_name,
            created_at: Utc::now(),
        }
    }
}
