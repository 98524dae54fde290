//! In-memory store using a Tokio mutex for single-node deployments and tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use pawhotel_core::error::AppError;
use pawhotel_core::result::AppResult;
use pawhotel_core::types::{AnimalId, ReservationId};
use pawhotel_entity::animal::Animal;
use pawhotel_entity::kennel::{AccommodationType, KennelUnit};
use pawhotel_entity::reservation::{Reservation, ReservationFilter, ReservationStatus};

use crate::store::{AnimalDirectory, KennelInventory, ReservationSink, ReservationSource};

#[derive(Debug, Default)]
struct InnerState {
    units: BTreeMap<(AccommodationType, i32), KennelUnit>,
    animals: HashMap<AnimalId, Animal>,
    reservations: HashMap<ReservationId, Reservation>,
}

impl InnerState {
    /// Reject writes that would break referential integrity or the
    /// no-overlap rule. `id` is skipped when checking overlap.
    fn check_write(&self, id: ReservationId, r: &Reservation) -> AppResult<()> {
        if !self.units.contains_key(&(r.accommodation_type, r.kennel_number)) {
            return Err(AppError::not_found(format!(
                "Kennel {} #{} not found",
                r.accommodation_type, r.kennel_number
            )));
        }
        if !self.animals.contains_key(&r.animal_id) {
            return Err(AppError::not_found(format!(
                "Animal {} not found",
                r.animal_id
            )));
        }
        if !r.status.holds_unit() {
            return Ok(());
        }

        let stay = r.stay();
        let clash = self
            .reservations
            .values()
            .find(|other| other.id != id && other.occupies(r.accommodation_type, r.kennel_number, &stay));

        if let Some(other) = clash {
            warn!(
                reservation_id = %id,
                conflicting_id = %other.id,
                kennel_number = r.kennel_number,
                "Rejected overlapping write"
            );
            return Err(AppError::conflict(format!(
                "Kennel {} #{} is already booked from {} to {}",
                r.accommodation_type, r.kennel_number, other.checkin_date, other.checkout_date
            )));
        }
        Ok(())
    }
}

/// All four contracts over one mutex-guarded state.
///
/// Each write checks and applies under the same lock, so two concurrent
/// inserts for the same unit and overlapping dates cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReservationSource for MemoryStore {
    async fn list_reservations(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        let state = self.state.lock().await;
        let mut rows: Vec<Reservation> = state
            .reservations
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.checkin_date, r.kennel_number, r.created_at));
        Ok(rows)
    }

    async fn find_reservation(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        let state = self.state.lock().await;
        Ok(state.reservations.get(&id).cloned())
    }
}

#[async_trait]
impl ReservationSink for MemoryStore {
    async fn insert_reservation(&self, reservation: &Reservation) -> AppResult<ReservationId> {
        let mut state = self.state.lock().await;

        if state.reservations.contains_key(&reservation.id) {
            return Err(AppError::conflict(format!(
                "Reservation {} already exists",
                reservation.id
            )));
        }
        state.check_write(reservation.id, reservation)?;
        state
            .reservations
            .insert(reservation.id, reservation.clone());

        debug!(reservation_id = %reservation.id, "Reservation stored");
        Ok(reservation.id)
    }

    async fn update_reservation(
        &self,
        id: ReservationId,
        reservation: &Reservation,
    ) -> AppResult<()> {
        let mut state = self.state.lock().await;

        let stored = state
            .reservations
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))?;
        if stored.status != ReservationStatus::Active {
            warn!(
                reservation_id = %id,
                status = %stored.status,
                "Rejected write to closed reservation"
            );
            return Err(AppError::invalid_state(format!(
                "Reservation {id} is already {}",
                stored.status
            )));
        }
        state.check_write(id, reservation)?;

        let mut stored = reservation.clone();
        stored.id = id;
        state.reservations.insert(id, stored);
        Ok(())
    }

    async fn delete_reservation(&self, id: ReservationId) -> AppResult<()> {
        let mut state = self.state.lock().await;
        state
            .reservations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))
    }
}

#[async_trait]
impl KennelInventory for MemoryStore {
    async fn list_kennel_units(
        &self,
        accommodation_type: Option<AccommodationType>,
    ) -> AppResult<Vec<KennelUnit>> {
        let state = self.state.lock().await;
        Ok(state
            .units
            .values()
            .filter(|u| accommodation_type.is_none_or(|t| u.accommodation_type == t))
            .cloned()
            .collect())
    }

    async fn add_kennel_unit(&self, unit: &KennelUnit) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let key = (unit.accommodation_type, unit.number);
        if state.units.contains_key(&key) {
            return Err(AppError::conflict(format!(
                "Kennel {} #{} already exists",
                unit.accommodation_type, unit.number
            )));
        }
        state.units.insert(key, unit.clone());
        Ok(())
    }

    async fn update_kennel_description(
        &self,
        accommodation_type: AccommodationType,
        number: i32,
        description: &str,
    ) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let unit = state
            .units
            .get_mut(&(accommodation_type, number))
            .ok_or_else(|| {
                AppError::not_found(format!("Kennel {accommodation_type} #{number} not found"))
            })?;
        unit.description = description.to_string();
        Ok(())
    }
}

#[async_trait]
impl AnimalDirectory for MemoryStore {
    async fn get_animal(&self, id: AnimalId) -> AppResult<Option<Animal>> {
        let state = self.state.lock().await;
        Ok(state.animals.get(&id).cloned())
    }

    async fn add_animal(&self, animal: &Animal) -> AppResult<()> {
        let mut state = self.state.lock().await;
        if state.animals.contains_key(&animal.id) {
            return Err(AppError::conflict(format!(
                "Animal {} already exists",
                animal.id
            )));
        }
        state.animals.insert(animal.id, animal.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, Utc};
    use pawhotel_core::error::ErrorKind;
    use pawhotel_core::types::Money;
    use pawhotel_entity::animal::{CreateAnimal, Species};
    use pawhotel_entity::reservation::PaymentMethod;

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    async fn seeded() -> (MemoryStore, AnimalId) {
        let store = MemoryStore::new();
        for n in 1..=2 {
            let unit = KennelUnit::new(AccommodationType::IndoorKennel, n, "").expect("unit");
            store.add_kennel_unit(&unit).await.expect("add unit");
        }
        let animal = CreateAnimal {
            name: "Rex".to_string(),
            species: Species::Dog,
            breed: None,
            owner_name: None,
        }
        .into_animal();
        store.add_animal(&animal).await.expect("add animal");
        (store, animal.id)
    }

    fn booking(animal_id: AnimalId, number: i32, checkin: &str, checkout: &str) -> Reservation {
        let now = Utc::now();
        Reservation {
            id: ReservationId::new(),
            animal_id,
            accommodation_type: AccommodationType::IndoorKennel,
            kennel_number: number,
            checkin_date: d(checkin),
            checkout_date: d(checkout),
            daily_rate: Money::from_units(50),
            total_days: 1,
            transport_service: false,
            transport_value: Money::ZERO,
            bath_service: false,
            bath_value: Money::ZERO,
            payment_method: PaymentMethod::Cash,
            total_value: Money::from_units(50),
            status: ReservationStatus::Active,
            cancel_reason: None,
            created_at: now,
            updated_at: now,
            finished_at: None,
            cancelled_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_overlap() {
        let (store, animal) = seeded().await;
        store
            .insert_reservation(&booking(animal, 1, "2025-03-01", "2025-03-05"))
            .await
            .expect("first insert");

        let err = store
            .insert_reservation(&booking(animal, 1, "2025-03-04", "2025-03-06"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Conflict));

        store
            .insert_reservation(&booking(animal, 1, "2025-03-05", "2025-03-06"))
            .await
            .expect("same-day turnover");
        store
            .insert_reservation(&booking(animal, 2, "2025-03-01", "2025-03-05"))
            .await
            .expect("other unit");
    }

    #[tokio::test]
    async fn test_inactive_rows_do_not_block() {
        let (store, animal) = seeded().await;
        let mut cancelled = booking(animal, 1, "2025-03-01", "2025-03-05");
        cancelled.status = ReservationStatus::Cancelled;
        store.insert_reservation(&cancelled).await.expect("insert");

        store
            .insert_reservation(&booking(animal, 1, "2025-03-02", "2025-03-03"))
            .await
            .expect("cancelled stay frees the unit");
    }

    #[tokio::test]
    async fn test_update_excludes_self() {
        let (store, animal) = seeded().await;
        let mut r = booking(animal, 1, "2025-03-01", "2025-03-05");
        let id = store.insert_reservation(&r).await.expect("insert");

        r.checkout_date = d("2025-03-07");
        store.update_reservation(id, &r).await.expect("extend own stay");
        let stored = store.find_reservation(id).await.expect("find").expect("exists");
        assert_eq!(stored.checkout_date, d("2025-03-07"));
    }

    #[tokio::test]
    async fn test_update_requires_active_row() {
        let (store, animal) = seeded().await;
        let r = booking(animal, 1, "2025-03-01", "2025-03-05");
        let id = store.insert_reservation(&r).await.expect("insert");

        let mut cancelled = r.clone();
        cancelled.status = ReservationStatus::Cancelled;
        store.update_reservation(id, &cancelled).await.expect("cancel");

        // A stale copy read while the row was still active must not win.
        let mut stale = r.clone();
        stale.checkout_date = d("2025-03-06");
        let err = store.update_reservation(id, &stale).await.unwrap_err();
        assert!(err.is(ErrorKind::InvalidState));

        let mut finished = r;
        finished.status = ReservationStatus::Finished;
        let err = store.update_reservation(id, &finished).await.unwrap_err();
        assert!(err.is(ErrorKind::InvalidState));

        let stored = store.find_reservation(id).await.expect("find").expect("exists");
        assert_eq!(stored.status, ReservationStatus::Cancelled);
        assert_eq!(stored.checkout_date, d("2025-03-05"));
    }

    #[tokio::test]
    async fn test_dangling_references() {
        let (store, animal) = seeded().await;
        let err = store
            .insert_reservation(&booking(animal, 9, "2025-03-01", "2025-03-02"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));

        let err = store
            .insert_reservation(&booking(AnimalId::new(), 1, "2025-03-01", "2025-03-02"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_single_winner() {
        let (store, animal) = seeded().await;
        let attempts = (0..8).map(|_| {
            let store = store.clone();
            let r = booking(animal, 1, "2025-03-01", "2025-03-04");
            async move { store.insert_reservation(&r).await }
        });

        let results = futures::future::join_all(attempts).await;
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert!(
            results
                .iter()
                .filter_map(|r| r.as_ref().err())
                .all(|e| e.is(ErrorKind::Conflict))
        );
    }

    #[tokio::test]
    async fn test_units_sorted_and_filtered() {
        let (store, _) = seeded().await;
        let cattery = KennelUnit::new(AccommodationType::Cattery, 1, "").expect("unit");
        store.add_kennel_unit(&cattery).await.expect("add");
        assert!(store.add_kennel_unit(&cattery).await.unwrap_err().is(ErrorKind::Conflict));

        let indoor = store
            .list_kennel_units(Some(AccommodationType::IndoorKennel))
            .await
            .expect("list");
        assert_eq!(indoor.iter().map(|u| u.number).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(store.list_kennel_units(None).await.expect("list").len(), 3);
    }
}
