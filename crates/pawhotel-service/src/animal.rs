//! Animal registration and lookup.

use std::sync::Arc;

use tracing::info;

use pawhotel_core::error::AppError;
use pawhotel_core::result::AppResult;
use pawhotel_core::types::AnimalId;
use pawhotel_database::store::AnimalDirectory;
use pawhotel_entity::animal::{Animal, CreateAnimal};

use crate::context::RequestContext;

/// Registers guest animals.
#[derive(Clone)]
pub struct AnimalService {
    animals: Arc<dyn AnimalDirectory>,
}

impl std::fmt::Debug for AnimalService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimalService").finish_non_exhaustive()
    }
}

impl AnimalService {
    /// Creates a new animal service.
    pub fn new(animals: Arc<dyn AnimalDirectory>) -> Self {
        Self { animals }
    }

    /// Register a new animal.
    pub async fn register(&self, ctx: &RequestContext, req: CreateAnimal) -> AppResult<Animal> {
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Animal name must not be empty"));
        }
        let animal = req.into_animal();
        self.animals.add_animal(&animal).await?;

        info!(
            operator = %ctx.operator,
            animal_id = %animal.id,
            species = %animal.species,
            "Animal registered"
        );
        Ok(animal)
    }

    /// Fetch an animal.
    pub async fn get(&self, id: AnimalId) -> AppResult<Animal> {
        self.animals
            .get_animal(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Animal {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pawhotel_core::error::ErrorKind;
    use pawhotel_database::MemoryStore;
    use pawhotel_entity::animal::Species;

    #[tokio::test]
    async fn test_register_and_get() {
        let service = AnimalService::new(Arc::new(MemoryStore::new()));
        let ctx = RequestContext::system();
        let animal = service
            .register(
                &ctx,
                CreateAnimal {
                    name: "Mia".to_string(),
                    species: Species::Cat,
                    breed: Some("Siamese".to_string()),
                    owner_name: None,
                },
            )
            .await
            .expect("register");

        let found = service.get(animal.id).await.expect("get");
        assert_eq!(found.name, "Mia");
        assert!(service.get(AnimalId::new()).await.unwrap_err().is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let service = AnimalService::new(Arc::new(MemoryStore::new()));
        let err = service
            .register(
                &RequestContext::system(),
                CreateAnimal {
                    name: "  ".to_string(),
                    species: Species::Dog,
                    breed: None,
                    owner_name: None,
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }
}
