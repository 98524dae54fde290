//! Pure overlap scans over a reservation snapshot.

use std::collections::BTreeSet;

use pawhotel_core::types::ReservationId;
use pawhotel_entity::kennel::{AccommodationType, KennelUnit};
use pawhotel_entity::reservation::{Reservation, StayDates};

/// Unit numbers of `accommodation_type` held by an active reservation for
/// any night of `stay`, skipping `exclude`.
pub fn occupied_in(
    snapshot: &[Reservation],
    accommodation_type: AccommodationType,
    stay: &StayDates,
    exclude: Option<ReservationId>,
) -> BTreeSet<i32> {
    snapshot
        .iter()
        .filter(|r| exclude != Some(r.id))
        .filter(|r| r.occupies(accommodation_type, r.kennel_number, stay))
        .map(|r| r.kennel_number)
        .collect()
}

/// Provisioned unit numbers of `accommodation_type` not in `occupied`,
/// ascending.
pub fn free_from(
    units: &[KennelUnit],
    accommodation_type: AccommodationType,
    occupied: &BTreeSet<i32>,
) -> Vec<i32> {
    let provisioned: BTreeSet<i32> = units
        .iter()
        .filter(|u| u.accommodation_type == accommodation_type)
        .map(|u| u.number)
        .collect();
    provisioned.difference(occupied).copied().collect()
}
