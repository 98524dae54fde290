//! Animal repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use pawhotel_core::result::AppResult;
use pawhotel_core::types::AnimalId;
use pawhotel_entity::animal::Animal;

use crate::error::map_sqlx_error;
use crate::store::AnimalDirectory;

/// Repository for the `animals` table.
#[derive(Debug, Clone)]
pub struct AnimalRepository {
    pool: PgPool,
}

impl AnimalRepository {
    /// Create a new animal repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnimalDirectory for AnimalRepository {
    async fn get_animal(&self, id: AnimalId) -> AppResult<Option<Animal>> {
        sqlx::query_as::<_, Animal>("SELECT * FROM animals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find animal", e))
    }

    async fn add_animal(&self, animal: &Animal) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO animals (id, name, species, breed, owner_name, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(animal.id)
        .bind(&animal.name)
        .bind(animal.species)
        .bind(&animal.breed)
        .bind(&animal.owner_name)
        .bind(animal.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to add animal", e))?;
        Ok(())
    }
}
