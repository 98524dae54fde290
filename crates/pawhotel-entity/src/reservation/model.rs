//! Reservation entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pawhotel_core::types::{AnimalId, Money, ReservationId};

use super::payment::PaymentMethod;
use super::stay::StayDates;
use super::status::ReservationStatus;
use crate::kennel::AccommodationType;

/// A flat-fee extra (transport or bath) and whether it was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddOn {
    /// Whether the service was requested.
    pub enabled: bool,
    /// Fee charged when enabled.
    pub value: Money,
}

impl AddOn {
    /// A requested add-on at `value`.
    pub fn enabled(value: Money) -> Self {
        Self {
            enabled: true,
            value,
        }
    }

    /// An add-on that was not requested.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Amount contributed to the total.
    pub fn charge(&self) -> Money {
        if self.enabled { self.value } else { Money::ZERO }
    }
}

/// One booking of one animal into one kennel unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: ReservationId,
    /// Guest animal.
    pub animal_id: AnimalId,
    /// Accommodation category of the booked unit.
    pub accommodation_type: AccommodationType,
    /// Booked unit number within the category.
    pub kennel_number: i32,
    /// First night.
    pub checkin_date: NaiveDate,
    /// Departure day; always after `checkin_date`.
    pub checkout_date: NaiveDate,
    /// Nightly rate.
    pub daily_rate: Money,
    /// Billed nights.
    pub total_days: i32,
    /// Transport requested.
    pub transport_service: bool,
    /// Transport fee.
    pub transport_value: Money,
    /// Bath/grooming requested.
    pub bath_service: bool,
    /// Bath fee.
    pub bath_value: Money,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Charged total.
    pub total_value: Money,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Reason given when cancelled.
    pub cancel_reason: Option<String>,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
    /// When the reservation was last written.
    pub updated_at: DateTime<Utc>,
    /// When the guest checked out.
    pub finished_at: Option<DateTime<Utc>>,
    /// When the reservation was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// The booked stay. Stored rows always satisfy `checkout > checkin`.
    pub fn stay(&self) -> StayDates {
        StayDates {
            checkin: self.checkin_date,
            checkout: self.checkout_date,
        }
    }

    /// Transport add-on.
    pub fn transport(&self) -> AddOn {
        AddOn {
            enabled: self.transport_service,
            value: self.transport_value,
        }
    }

    /// Bath add-on.
    pub fn bath(&self) -> AddOn {
        AddOn {
            enabled: self.bath_service,
            value: self.bath_value,
        }
    }

    /// Replace the transport add-on.
    pub fn set_transport(&mut self, add_on: AddOn) {
        self.transport_service = add_on.enabled;
        self.transport_value = add_on.value;
    }

    /// Replace the bath add-on.
    pub fn set_bath(&mut self, add_on: AddOn) {
        self.bath_service = add_on.enabled;
        self.bath_value = add_on.value;
    }

    /// Replace the booked stay.
    pub fn set_stay(&mut self, stay: StayDates) {
        self.checkin_date = stay.checkin;
        self.checkout_date = stay.checkout;
    }

    /// Whether this reservation holds `number` of `accommodation_type`
    /// for any night of `stay`.
    pub fn occupies(
        &self,
        accommodation_type: AccommodationType,
        number: i32,
        stay: &StayDates,
    ) -> bool {
        self.status.holds_unit()
            && self.accommodation_type == accommodation_type
            && self.kennel_number == number
            && self.stay().overlaps(stay)
    }
}
