//! Collaborator contracts between the booking core and persistence.
//!
//! The availability resolver and reservation service only see these
//! traits. Implementations own commit atomicity: a sink must refuse to
//! store an `Active` reservation whose stay overlaps another `Active`
//! reservation on the same unit, even if the caller already checked.

use async_trait::async_trait;

use pawhotel_core::result::AppResult;
use pawhotel_core::types::{AnimalId, ReservationId};
use pawhotel_entity::animal::Animal;
use pawhotel_entity::kennel::{AccommodationType, KennelUnit};
use pawhotel_entity::reservation::{Reservation, ReservationFilter};

/// Read side of the reservation ledger.
#[async_trait]
pub trait ReservationSource: Send + Sync + 'static {
    /// List reservations matching `filter`, ordered by checkin date then
    /// kennel number.
    async fn list_reservations(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>>;

    /// Find a reservation by id.
    async fn find_reservation(&self, id: ReservationId) -> AppResult<Option<Reservation>>;
}

/// Write side of the reservation ledger.
#[async_trait]
pub trait ReservationSink: Send + Sync + 'static {
    /// Store a new reservation.
    ///
    /// Fails with `Conflict` on an overlapping active booking and with
    /// `NotFound` when the unit or animal does not exist.
    async fn insert_reservation(&self, reservation: &Reservation) -> AppResult<ReservationId>;

    /// Replace the stored reservation `id`, which must still be `Active`.
    ///
    /// Same failure modes as insert, plus `NotFound` for an unknown id and
    /// `InvalidState` when the stored row has already been finished or
    /// cancelled.
    async fn update_reservation(&self, id: ReservationId, reservation: &Reservation)
    -> AppResult<()>;

    /// Physically remove reservation `id`.
    async fn delete_reservation(&self, id: ReservationId) -> AppResult<()>;
}

/// Provisioned kennel units.
#[async_trait]
pub trait KennelInventory: Send + Sync + 'static {
    /// List units, optionally of one type, ascending by type then number.
    async fn list_kennel_units(
        &self,
        accommodation_type: Option<AccommodationType>,
    ) -> AppResult<Vec<KennelUnit>>;

    /// Provision a unit. Fails with `Conflict` if `(type, number)` exists.
    async fn add_kennel_unit(&self, unit: &KennelUnit) -> AppResult<()>;

    /// Change a unit's description. Fails with `NotFound` for unknown units.
    async fn update_kennel_description(
        &self,
        accommodation_type: AccommodationType,
        number: i32,
        description: &str,
    ) -> AppResult<()>;
}

/// Animal lookup, used for species gating.
#[async_trait]
pub trait AnimalDirectory: Send + Sync + 'static {
    /// Find an animal by id.
    async fn get_animal(&self, id: AnimalId) -> AppResult<Option<Animal>>;

    /// Register an animal.
    async fn add_animal(&self, animal: &Animal) -> AppResult<()>;
}
