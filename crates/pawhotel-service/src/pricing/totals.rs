//! Stay totals and early-checkout recalculation.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use pawhotel_core::error::AppError;
use pawhotel_core::result::AppResult;
use pawhotel_core::types::Money;
use pawhotel_entity::reservation::{AddOn, Reservation, ReservationStatus, StayDates};

/// Derived day count and charge for a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Billed nights, at least one.
    pub total_days: u32,
    /// `total_days * daily_rate` plus enabled add-ons.
    pub total_value: Money,
}

impl Totals {
    /// Day count as stored on a reservation row.
    pub fn total_days_i32(&self) -> AppResult<i32> {
        i32::try_from(self.total_days)
            .map_err(|_| AppError::validation("Stay is too long to record"))
    }
}

/// Compute nights and total for `checkin..checkout` at `daily_rate`.
///
/// Missing add-ons count as disabled. Fails with `InvalidRange` when
/// `checkout <= checkin` and with `Validation` for negative amounts.
pub fn compute_totals(
    checkin: NaiveDate,
    checkout: NaiveDate,
    daily_rate: Money,
    transport: Option<AddOn>,
    bath: Option<AddOn>,
) -> AppResult<Totals> {
    let stay = StayDates::new(checkin, checkout)?;
    let transport = transport.unwrap_or_default();
    let bath = bath.unwrap_or_default();

    daily_rate.ensure_non_negative("Daily rate")?;
    transport.value.ensure_non_negative("Transport value")?;
    bath.value.ensure_non_negative("Bath value")?;

    let total_days = stay.nights();
    let total_value = daily_rate
        .checked_mul(total_days)
        .and_then(|lodging| lodging.checked_add(transport.charge()))
        .and_then(|sum| sum.checked_add(bath.charge()))
        .ok_or_else(|| AppError::validation("Total exceeds the supported amount"))?;

    Ok(Totals {
        total_days,
        total_value,
    })
}

/// Finish `reservation` at `actual_checkout`.
///
/// Leaving before the booked checkout re-prices the stay from checkin to
/// the actual date with the original rate and add-ons. Leaving on or after
/// the booked checkout keeps the booked totals. Leaving on the checkin day
/// bills the one-night minimum and records checkout as the next day.
/// The result is `Finished`; timestamps are left to the caller.
pub fn recompute_for_early_checkout(
    reservation: &Reservation,
    actual_checkout: NaiveDate,
) -> AppResult<Reservation> {
    let checkin = reservation.checkin_date;
    if actual_checkout < checkin {
        return Err(AppError::invalid_range(format!(
            "Checkout {actual_checkout} is before checkin {checkin}"
        )));
    }

    let mut finished = reservation.clone();
    finished.status = ReservationStatus::Finished;

    if actual_checkout >= reservation.checkout_date {
        return Ok(finished);
    }

    let recorded_checkout = if actual_checkout == checkin {
        checkin
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::invalid_range("Checkout date out of range"))?
    } else {
        actual_checkout
    };

    let totals = compute_totals(
        checkin,
        recorded_checkout,
        reservation.daily_rate,
        Some(reservation.transport()),
        Some(reservation.bath()),
    )?;

    finished.checkout_date = recorded_checkout;
    finished.total_days = totals.total_days_i32()?;
    finished.total_value = totals.total_value;
    Ok(finished)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use pawhotel_core::error::ErrorKind;
    use pawhotel_core::types::{AnimalId, ReservationId};
    use pawhotel_entity::kennel::AccommodationType;
    use pawhotel_entity::reservation::PaymentMethod;

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    fn booked(checkin: &str, checkout: &str, rate: i64) -> Reservation {
        let totals = compute_totals(d(checkin), d(checkout), units(rate), None, None)
            .expect("valid booking");
        let now = Utc::now();
        Reservation {
            id: ReservationId::new(),
            animal_id: AnimalId::new(),
            accommodation_type: AccommodationType::IndoorKennel,
            kennel_number: 1,
            checkin_date: d(checkin),
            checkout_date: d(checkout),
            daily_rate: units(rate),
            total_days: totals.total_days_i32().expect("fits"),
            transport_service: false,
            transport_value: Money::ZERO,
            bath_service: false,
            bath_value: Money::ZERO,
            payment_method: PaymentMethod::Cash,
            total_value: totals.total_value,
            status: ReservationStatus::Active,
            cancel_reason: None,
            created_at: now,
            updated_at: now,
            finished_at: None,
            cancelled_at: None,
        }
    }

    #[test]
    fn test_three_nights_at_fifty() {
        let totals =
            compute_totals(d("2025-03-01"), d("2025-03-04"), units(50), None, None).expect("ok");
        assert_eq!(totals.total_days, 3);
        assert_eq!(totals.total_value, units(150));
    }

    #[test]
    fn test_only_enabled_add_ons_are_charged() {
        let totals = compute_totals(
            d("2025-03-01"),
            d("2025-03-02"),
            units(50),
            Some(AddOn::enabled(units(28))),
            Some(AddOn {
                enabled: false,
                value: units(50),
            }),
        )
        .expect("ok");
        assert_eq!(totals.total_days, 1);
        assert_eq!(totals.total_value, units(78));
    }

    #[test]
    fn test_invalid_range() {
        let same = compute_totals(d("2025-03-01"), d("2025-03-01"), units(50), None, None);
        assert!(same.unwrap_err().is(ErrorKind::InvalidRange));
        let reversed = compute_totals(d("2025-03-04"), d("2025-03-01"), units(50), None, None);
        assert!(reversed.unwrap_err().is(ErrorKind::InvalidRange));
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let err = compute_totals(
            d("2025-03-01"),
            d("2025-03-02"),
            Money::from_cents(-1),
            None,
            None,
        )
        .unwrap_err();
        assert!(err.is(ErrorKind::Validation));

        let err = compute_totals(
            d("2025-03-01"),
            d("2025-03-02"),
            units(50),
            Some(AddOn::enabled(Money::from_cents(-500))),
            None,
        )
        .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[test]
    fn test_early_checkout_reprices() {
        let r = booked("2025-03-01", "2025-03-10", 50);
        let finished = recompute_for_early_checkout(&r, d("2025-03-04")).expect("ok");
        assert_eq!(finished.total_days, 3);
        assert_eq!(finished.total_value, units(150));
        assert_eq!(finished.checkout_date, d("2025-03-04"));
        assert_eq!(finished.status, ReservationStatus::Finished);
        assert_eq!(finished.daily_rate, units(50));
    }

    #[test]
    fn test_early_checkout_keeps_add_ons() {
        let mut r = booked("2025-03-01", "2025-03-10", 50);
        r.set_transport(AddOn::enabled(units(28)));
        r.set_bath(AddOn {
            enabled: false,
            value: units(50),
        });
        let finished = recompute_for_early_checkout(&r, d("2025-03-03")).expect("ok");
        assert_eq!(finished.total_value, units(2 * 50 + 28));
        assert_eq!(finished.transport_value, units(28));
    }

    #[test]
    fn test_on_schedule_or_late_keeps_totals() {
        let r = booked("2025-03-01", "2025-03-10", 50);
        for actual in ["2025-03-10", "2025-03-12"] {
            let finished = recompute_for_early_checkout(&r, d(actual)).expect("ok");
            assert_eq!(finished.total_days, 9);
            assert_eq!(finished.total_value, units(450));
            assert_eq!(finished.checkout_date, d("2025-03-10"));
            assert_eq!(finished.status, ReservationStatus::Finished);
        }
    }

    #[test]
    fn test_same_day_checkout_bills_one_night() {
        let r = booked("2025-03-01", "2025-03-10", 50);
        let finished = recompute_for_early_checkout(&r, d("2025-03-01")).expect("ok");
        assert_eq!(finished.total_days, 1);
        assert_eq!(finished.total_value, units(50));
        assert_eq!(finished.checkout_date, d("2025-03-02"));
    }

    #[test]
    fn test_checkout_before_checkin_rejected() {
        let r = booked("2025-03-05", "2025-03-10", 50);
        let err = recompute_for_early_checkout(&r, d("2025-03-04")).unwrap_err();
        assert!(err.is(ErrorKind::InvalidRange));
    }
}
