//! Request and response types for the reservation service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use pawhotel_core::types::{AnimalId, Money};
use pawhotel_entity::kennel::AccommodationType;
use pawhotel_entity::reservation::{AddOn, PaymentMethod};

use crate::pricing::rates::AddOnRequest;

/// Price a prospective stay and list the units that could take it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteRequest {
    /// Guest animal.
    pub animal_id: AnimalId,
    /// Requested accommodation type.
    pub accommodation_type: AccommodationType,
    /// Specific unit to check, if the operator already picked one.
    #[validate(range(min = 1))]
    pub kennel_number: Option<i32>,
    /// First night.
    pub checkin_date: NaiveDate,
    /// Departure day.
    pub checkout_date: NaiveDate,
    /// Nightly rate; defaults by species.
    pub daily_rate: Option<Money>,
    /// Transport add-on.
    #[serde(default)]
    pub transport: AddOnRequest,
    /// Bath add-on.
    #[serde(default)]
    pub bath: AddOnRequest,
}

/// Result of a quote. Nothing is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Accommodation type quoted.
    pub accommodation_type: AccommodationType,
    /// Free units for the stay, ascending.
    pub free_units: Vec<i32>,
    /// The unit that was checked, if one was requested.
    pub kennel_number: Option<i32>,
    /// Nightly rate applied.
    pub daily_rate: Money,
    /// Resolved transport add-on.
    pub transport: AddOn,
    /// Resolved bath add-on.
    pub bath: AddOn,
    /// Billed nights.
    pub total_days: u32,
    /// Charged total.
    pub total_value: Money,
}

/// Book a unit for an animal.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReservationRequest {
    /// Guest animal.
    pub animal_id: AnimalId,
    /// Accommodation type.
    pub accommodation_type: AccommodationType,
    /// Unit number within the type.
    #[validate(range(min = 1))]
    pub kennel_number: i32,
    /// First night.
    pub checkin_date: NaiveDate,
    /// Departure day.
    pub checkout_date: NaiveDate,
    /// Nightly rate; defaults by species.
    pub daily_rate: Option<Money>,
    /// Transport add-on.
    #[serde(default)]
    pub transport: AddOnRequest,
    /// Bath add-on.
    #[serde(default)]
    pub bath: AddOnRequest,
    /// How the stay will be paid.
    pub payment_method: PaymentMethod,
}

/// Edit an active reservation. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateReservationRequest {
    /// New accommodation type.
    pub accommodation_type: Option<AccommodationType>,
    /// New unit number.
    #[validate(range(min = 1))]
    pub kennel_number: Option<i32>,
    /// New first night.
    pub checkin_date: Option<NaiveDate>,
    /// New departure day.
    pub checkout_date: Option<NaiveDate>,
    /// New nightly rate.
    pub daily_rate: Option<Money>,
    /// New transport add-on.
    pub transport: Option<AddOnRequest>,
    /// New bath add-on.
    pub bath: Option<AddOnRequest>,
    /// New payment method.
    pub payment_method: Option<PaymentMethod>,
}

impl UpdateReservationRequest {
    /// Whether the edit touches the unit or the dates.
    pub fn moves_stay(&self) -> bool {
        self.accommodation_type.is_some()
            || self.kennel_number.is_some()
            || self.checkin_date.is_some()
            || self.checkout_date.is_some()
    }
}
