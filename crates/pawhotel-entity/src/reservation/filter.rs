//! Reservation listing filters.

use serde::{Deserialize, Serialize};

use super::model::Reservation;
use super::stay::StayDates;
use super::status::ReservationStatus;
use crate::kennel::AccommodationType;

/// Criteria for listing reservations. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationFilter {
    /// Only this accommodation type.
    pub accommodation_type: Option<AccommodationType>,
    /// Only this status.
    pub status: Option<ReservationStatus>,
    /// Only stays overlapping this range.
    pub date_range: Option<StayDates>,
}

impl ReservationFilter {
    /// Active reservations of one type, the occupancy scan input.
    pub fn active_of_type(accommodation_type: AccommodationType) -> Self {
        Self {
            accommodation_type: Some(accommodation_type),
            status: Some(ReservationStatus::Active),
            date_range: None,
        }
    }

    /// Narrow to stays overlapping `range`.
    pub fn overlapping(mut self, range: StayDates) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Narrow to one status.
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Evaluate the filter in memory.
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.accommodation_type
            .is_none_or(|t| t == reservation.accommodation_type)
            && self.status.is_none_or(|s| s == reservation.status)
            && self
                .date_range
                .is_none_or(|range| range.overlaps(&reservation.stay()))
    }
}
