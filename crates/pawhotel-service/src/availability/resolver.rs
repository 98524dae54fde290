//! Availability resolver over the reservation ledger and kennel inventory.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use pawhotel_core::error::AppError;
use pawhotel_core::result::AppResult;
use pawhotel_core::types::{AnimalId, ReservationId};
use pawhotel_database::store::{AnimalDirectory, KennelInventory, ReservationSource};
use pawhotel_entity::animal::Animal;
use pawhotel_entity::kennel::AccommodationType;
use pawhotel_entity::reservation::{ReservationFilter, StayDates};

use super::scan::{free_from, occupied_in};

/// Answers which kennel units are free for a stay.
///
/// Every call fetches a fresh snapshot, so repeated calls with no writes in
/// between return the same answer. The resolver never writes.
#[derive(Clone)]
pub struct AvailabilityResolver {
    reservations: Arc<dyn ReservationSource>,
    inventory: Arc<dyn KennelInventory>,
    animals: Arc<dyn AnimalDirectory>,
}

impl std::fmt::Debug for AvailabilityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityResolver").finish_non_exhaustive()
    }
}

impl AvailabilityResolver {
    /// Creates a resolver.
    pub fn new(
        reservations: Arc<dyn ReservationSource>,
        inventory: Arc<dyn KennelInventory>,
        animals: Arc<dyn AnimalDirectory>,
    ) -> Self {
        Self {
            reservations,
            inventory,
            animals,
        }
    }

    /// Unit numbers held by active reservations overlapping `start..end`.
    pub async fn occupied_units(
        &self,
        accommodation_type: AccommodationType,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<ReservationId>,
    ) -> AppResult<BTreeSet<i32>> {
        let stay = StayDates::new(start, end)?;
        self.occupied_for(accommodation_type, &stay, exclude).await
    }

    /// Provisioned unit numbers free for `start..end`, ascending.
    pub async fn free_units(
        &self,
        accommodation_type: AccommodationType,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<ReservationId>,
    ) -> AppResult<Vec<i32>> {
        let stay = StayDates::new(start, end)?;
        let occupied = self.occupied_for(accommodation_type, &stay, exclude).await?;
        let units = self
            .inventory
            .list_kennel_units(Some(accommodation_type))
            .await?;

        let free = free_from(&units, accommodation_type, &occupied);
        debug!(
            accommodation_type = %accommodation_type,
            %start,
            %end,
            provisioned = units.len(),
            free = free.len(),
            "Listed free units"
        );
        Ok(free)
    }

    /// Check that unit `number` can take the stay `start..end`.
    ///
    /// Fails with `NotFound` for an unprovisioned unit and `Conflict` when
    /// another active reservation holds it.
    pub async fn validate_booking(
        &self,
        accommodation_type: AccommodationType,
        number: i32,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<ReservationId>,
    ) -> AppResult<()> {
        let stay = StayDates::new(start, end)?;

        let units = self
            .inventory
            .list_kennel_units(Some(accommodation_type))
            .await?;
        if !units.iter().any(|u| u.number == number) {
            return Err(AppError::not_found(format!(
                "Kennel {accommodation_type} #{number} not found"
            )));
        }

        let occupied = self.occupied_for(accommodation_type, &stay, exclude).await?;
        if occupied.contains(&number) {
            warn!(
                accommodation_type = %accommodation_type,
                kennel_number = number,
                %start,
                %end,
                "Kennel unit already booked"
            );
            return Err(AppError::conflict(format!(
                "Kennel {accommodation_type} #{number} is not available from {start} to {end}"
            )));
        }
        Ok(())
    }

    /// Load the animal and check it may be housed in `accommodation_type`.
    pub async fn ensure_species_allowed(
        &self,
        animal_id: AnimalId,
        accommodation_type: AccommodationType,
    ) -> AppResult<Animal> {
        let animal = self
            .animals
            .get_animal(animal_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Animal {animal_id} not found")))?;

        if !accommodation_type.accepts(animal.species) {
            warn!(
                animal_id = %animal_id,
                species = %animal.species,
                accommodation_type = %accommodation_type,
                "Species not allowed in accommodation"
            );
            let allowed: Vec<&str> = animal
                .species
                .allowed_accommodations()
                .iter()
                .map(AccommodationType::as_str)
                .collect();
            return Err(AppError::species_mismatch(format!(
                "A {} cannot stay in {accommodation_type} (allowed: {})",
                animal.species,
                allowed.join(", ")
            )));
        }
        Ok(animal)
    }

    /// Free units for a specific animal. Species gating runs first, so an
    /// incompatible type is an error rather than an empty list.
    pub async fn free_units_for_animal(
        &self,
        animal_id: AnimalId,
        accommodation_type: AccommodationType,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<ReservationId>,
    ) -> AppResult<Vec<i32>> {
        self.ensure_species_allowed(animal_id, accommodation_type)
            .await?;
        self.free_units(accommodation_type, start, end, exclude)
            .await
    }

    async fn occupied_for(
        &self,
        accommodation_type: AccommodationType,
        stay: &StayDates,
        exclude: Option<ReservationId>,
    ) -> AppResult<BTreeSet<i32>> {
        let filter = ReservationFilter::active_of_type(accommodation_type).overlapping(*stay);
        let snapshot = self.reservations.list_reservations(&filter).await?;
        Ok(occupied_in(&snapshot, accommodation_type, stay, exclude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pawhotel_core::error::ErrorKind;
    use pawhotel_database::MemoryStore;
    use pawhotel_entity::animal::{CreateAnimal, Species};
    use pawhotel_entity::kennel::KennelUnit;

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    async fn setup() -> (AvailabilityResolver, MemoryStore) {
        let store = MemoryStore::new();
        for n in 1..=3 {
            let unit = KennelUnit::new(AccommodationType::IndoorKennel, n, "").expect("unit");
            store.add_kennel_unit(&unit).await.expect("add unit");
        }
        let shared = Arc::new(store.clone());
        let resolver = AvailabilityResolver::new(shared.clone(), shared.clone(), shared);
        (resolver, store)
    }

    async fn animal(store: &MemoryStore, species: Species) -> AnimalId {
        let animal = CreateAnimal {
            name: "Guest".to_string(),
            species,
            breed: None,
            owner_name: None,
        }
        .into_animal();
        store.add_animal(&animal).await.expect("add animal");
        animal.id
    }

    #[tokio::test]
    async fn test_empty_ledger_everything_free() {
        let (resolver, _) = setup().await;
        let free = resolver
            .free_units(AccommodationType::IndoorKennel, d("2025-03-01"), d("2025-03-04"), None)
            .await
            .expect("free");
        assert_eq!(free, vec![1, 2, 3]);

        let none = resolver
            .free_units(AccommodationType::Cattery, d("2025-03-01"), d("2025-03-04"), None)
            .await
            .expect("free");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_range() {
        let (resolver, _) = setup().await;
        let err = resolver
            .occupied_units(AccommodationType::IndoorKennel, d("2025-03-04"), d("2025-03-04"), None)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::InvalidRange));
    }

    #[tokio::test]
    async fn test_validate_unknown_unit() {
        let (resolver, _) = setup().await;
        let err = resolver
            .validate_booking(
                AccommodationType::IndoorKennel,
                7,
                d("2025-03-01"),
                d("2025-03-02"),
                None,
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_species_checked_before_listing() {
        let (resolver, store) = setup().await;
        let cat = animal(&store, Species::Cat).await;

        // Reversed dates would be InvalidRange; species wins.
        let err = resolver
            .free_units_for_animal(
                cat,
                AccommodationType::IndoorKennel,
                d("2025-03-04"),
                d("2025-03-01"),
                None,
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::SpeciesMismatch));
        assert!(err.message.contains("allowed: cattery"));

        let err = resolver
            .ensure_species_allowed(AnimalId::new(), AccommodationType::Cattery)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_dog_sees_free_units() {
        let (resolver, store) = setup().await;
        let dog = animal(&store, Species::Dog).await;
        let free = resolver
            .free_units_for_animal(
                dog,
                AccommodationType::IndoorKennel,
                d("2025-03-01"),
                d("2025-03-02"),
                None,
            )
            .await
            .expect("free");
        assert_eq!(free, vec![1, 2, 3]);
    }
}
