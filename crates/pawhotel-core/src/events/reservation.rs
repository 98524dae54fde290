//! Reservation lifecycle events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Money, ReservationId};

/// Events related to a reservation's lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReservationEvent {
    /// A reservation was confirmed and now holds a kennel unit.
    Booked {
        /// The reservation ID.
        reservation_id: ReservationId,
        /// Accommodation type (`indoor_kennel`, `outdoor_kennel`, `cattery`).
        accommodation_type: String,
        /// Kennel unit number.
        kennel_number: i32,
        /// First night of the stay.
        checkin_date: NaiveDate,
        /// Departure day (exclusive).
        checkout_date: NaiveDate,
        /// Charged total.
        total_value: Money,
    },
    /// An active reservation's dates, unit, or charges changed.
    Updated {
        /// The reservation ID.
        reservation_id: ReservationId,
        /// Kennel unit number after the edit.
        kennel_number: i32,
        /// Checkin date after the edit.
        checkin_date: NaiveDate,
        /// Checkout date after the edit.
        checkout_date: NaiveDate,
        /// Total after the edit.
        total_value: Money,
    },
    /// The guest checked out and the reservation is finished.
    CheckedOut {
        /// The reservation ID.
        reservation_id: ReservationId,
        /// Recorded checkout date.
        checkout_date: NaiveDate,
        /// Billed nights.
        total_days: i32,
        /// Final total.
        total_value: Money,
        /// Whether the stay was shortened and re-priced.
        early: bool,
    },
    /// The reservation was cancelled before completion.
    Cancelled {
        /// The reservation ID.
        reservation_id: ReservationId,
        /// Operator-provided reason.
        reason: Option<String>,
    },
    /// A terminal reservation was removed from the ledger.
    Deleted {
        /// The reservation ID.
        reservation_id: ReservationId,
    },
}

impl ReservationEvent {
    /// The reservation this event refers to.
    pub fn reservation_id(&self) -> ReservationId {
        match self {
            Self::Booked { reservation_id, .. }
            | Self::Updated { reservation_id, .. }
            | Self::CheckedOut { reservation_id, .. }
            | Self::Cancelled { reservation_id, .. }
            | Self::Deleted { reservation_id } => *reservation_id,
        }
    }
}
