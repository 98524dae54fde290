//! Reservation lifecycle service.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use validator::Validate;

use pawhotel_core::error::AppError;
use pawhotel_core::events::ReservationEvent;
use pawhotel_core::result::AppResult;
use pawhotel_core::types::{Money, ReservationId};
use pawhotel_database::store::{ReservationSink, ReservationSource};
use pawhotel_entity::reservation::{Reservation, ReservationFilter, ReservationStatus, StayDates};

use super::request::{CreateReservationRequest, Quote, QuoteRequest, UpdateReservationRequest};
use crate::availability::AvailabilityResolver;
use crate::context::RequestContext;
use crate::events::EventPublisher;
use crate::pricing::{RateCard, compute_totals, recompute_for_early_checkout};

/// Drives reservations through `Active -> Finished | Cancelled`.
///
/// Every write re-validates availability against a fresh snapshot right
/// before handing the row to the sink; the sink refuses overlaps on its
/// own as well, so a lost race surfaces as `Conflict`.
#[derive(Clone)]
pub struct ReservationService {
    resolver: AvailabilityResolver,
    source: Arc<dyn ReservationSource>,
    sink: Arc<dyn ReservationSink>,
    rates: RateCard,
    events: EventPublisher,
}

impl std::fmt::Debug for ReservationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationService")
            .field("rates", &self.rates)
            .finish_non_exhaustive()
    }
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(
        resolver: AvailabilityResolver,
        source: Arc<dyn ReservationSource>,
        sink: Arc<dyn ReservationSink>,
        rates: RateCard,
        events: EventPublisher,
    ) -> Self {
        Self {
            resolver,
            source,
            sink,
            rates,
            events,
        }
    }

    /// Price a stay and list free units without writing anything.
    pub async fn quote(&self, req: QuoteRequest) -> AppResult<Quote> {
        req.validate()?;

        let animal = self
            .resolver
            .ensure_species_allowed(req.animal_id, req.accommodation_type)
            .await?;

        let free_units = self
            .resolver
            .free_units(
                req.accommodation_type,
                req.checkin_date,
                req.checkout_date,
                None,
            )
            .await?;

        if let Some(number) = req.kennel_number {
            self.resolver
                .validate_booking(
                    req.accommodation_type,
                    number,
                    req.checkin_date,
                    req.checkout_date,
                    None,
                )
                .await?;
        }

        let daily_rate = req
            .daily_rate
            .unwrap_or_else(|| self.rates.daily_rate_for(animal.species));
        let transport = self.rates.transport(req.transport);
        let bath = self.rates.bath(req.bath);
        let totals = compute_totals(
            req.checkin_date,
            req.checkout_date,
            daily_rate,
            Some(transport),
            Some(bath),
        )?;

        Ok(Quote {
            accommodation_type: req.accommodation_type,
            free_units,
            kennel_number: req.kennel_number,
            daily_rate,
            transport,
            bath,
            total_days: totals.total_days,
            total_value: totals.total_value,
        })
    }

    /// Book a unit. The reservation starts `Active`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateReservationRequest,
    ) -> AppResult<Reservation> {
        req.validate()?;

        let animal = self
            .resolver
            .ensure_species_allowed(req.animal_id, req.accommodation_type)
            .await?;

        self.resolver
            .validate_booking(
                req.accommodation_type,
                req.kennel_number,
                req.checkin_date,
                req.checkout_date,
                None,
            )
            .await?;

        let daily_rate = req
            .daily_rate
            .unwrap_or_else(|| self.rates.daily_rate_for(animal.species));
        let transport = self.rates.transport(req.transport);
        let bath = self.rates.bath(req.bath);
        let totals = compute_totals(
            req.checkin_date,
            req.checkout_date,
            daily_rate,
            Some(transport),
            Some(bath),
        )?;

        let now = ctx.request_time;
        let mut reservation = Reservation {
            id: ReservationId::new(),
            animal_id: animal.id,
            accommodation_type: req.accommodation_type,
            kennel_number: req.kennel_number,
            checkin_date: req.checkin_date,
            checkout_date: req.checkout_date,
            daily_rate,
            total_days: totals.total_days_i32()?,
            transport_service: false,
            transport_value: Money::ZERO,
            bath_service: false,
            bath_value: Money::ZERO,
            payment_method: req.payment_method,
            total_value: totals.total_value,
            status: ReservationStatus::Active,
            cancel_reason: None,
            created_at: now,
            updated_at: now,
            finished_at: None,
            cancelled_at: None,
        };
        reservation.set_transport(transport);
        reservation.set_bath(bath);

        let id = self.sink.insert_reservation(&reservation).await.inspect_err(|e| {
            warn!(
                operator = %ctx.operator,
                kennel_number = reservation.kennel_number,
                error = %e,
                "Booking rejected at commit"
            );
        })?;
        reservation.id = id;

        info!(
            operator = %ctx.operator,
            reservation_id = %id,
            animal_id = %reservation.animal_id,
            accommodation_type = %reservation.accommodation_type,
            kennel_number = reservation.kennel_number,
            checkin = %reservation.checkin_date,
            checkout = %reservation.checkout_date,
            total = %reservation.total_value,
            "Reservation booked"
        );

        self.events.publish(
            ctx,
            ReservationEvent::Booked {
                reservation_id: id,
                accommodation_type: reservation.accommodation_type.to_string(),
                kennel_number: reservation.kennel_number,
                checkin_date: reservation.checkin_date,
                checkout_date: reservation.checkout_date,
                total_value: reservation.total_value,
            },
        );

        Ok(reservation)
    }

    /// Edit an active reservation.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: ReservationId,
        req: UpdateReservationRequest,
    ) -> AppResult<Reservation> {
        req.validate()?;

        let current = self.get(id).await?;
        ensure_active(&current, "edit")?;

        let mut updated = current.clone();
        updated.accommodation_type = req
            .accommodation_type
            .unwrap_or(current.accommodation_type);
        updated.kennel_number = req.kennel_number.unwrap_or(current.kennel_number);
        let stay = StayDates::new(
            req.checkin_date.unwrap_or(current.checkin_date),
            req.checkout_date.unwrap_or(current.checkout_date),
        )?;
        updated.set_stay(stay);

        if req.moves_stay() {
            self.resolver
                .ensure_species_allowed(updated.animal_id, updated.accommodation_type)
                .await?;
            self.resolver
                .validate_booking(
                    updated.accommodation_type,
                    updated.kennel_number,
                    stay.checkin(),
                    stay.checkout(),
                    Some(id),
                )
                .await?;
        }

        if let Some(rate) = req.daily_rate {
            updated.daily_rate = rate;
        }
        if let Some(transport) = req.transport {
            updated.set_transport(self.rates.transport(transport));
        }
        if let Some(bath) = req.bath {
            updated.set_bath(self.rates.bath(bath));
        }
        if let Some(method) = req.payment_method {
            updated.payment_method = method;
        }

        let totals = compute_totals(
            stay.checkin(),
            stay.checkout(),
            updated.daily_rate,
            Some(updated.transport()),
            Some(updated.bath()),
        )?;
        updated.total_days = totals.total_days_i32()?;
        updated.total_value = totals.total_value;
        updated.updated_at = ctx.request_time;

        self.sink.update_reservation(id, &updated).await?;

        info!(
            operator = %ctx.operator,
            reservation_id = %id,
            kennel_number = updated.kennel_number,
            checkin = %updated.checkin_date,
            checkout = %updated.checkout_date,
            total = %updated.total_value,
            "Reservation updated"
        );

        self.events.publish(
            ctx,
            ReservationEvent::Updated {
                reservation_id: id,
                kennel_number: updated.kennel_number,
                checkin_date: updated.checkin_date,
                checkout_date: updated.checkout_date,
                total_value: updated.total_value,
            },
        );

        Ok(updated)
    }

    /// Check the guest out on `actual_checkout`, re-pricing early departures.
    pub async fn checkout(
        &self,
        ctx: &RequestContext,
        id: ReservationId,
        actual_checkout: NaiveDate,
    ) -> AppResult<Reservation> {
        let current = self.get(id).await?;
        ensure_active(&current, "check out")?;

        let mut finished = recompute_for_early_checkout(&current, actual_checkout)?;
        let now = ctx.request_time;
        finished.finished_at = Some(now);
        finished.updated_at = now;

        self.sink.update_reservation(id, &finished).await?;

        let early = actual_checkout < current.checkout_date;
        info!(
            operator = %ctx.operator,
            reservation_id = %id,
            checkout = %finished.checkout_date,
            total_days = finished.total_days,
            total = %finished.total_value,
            early,
            "Reservation finished"
        );

        self.events.publish(
            ctx,
            ReservationEvent::CheckedOut {
                reservation_id: id,
                checkout_date: finished.checkout_date,
                total_days: finished.total_days,
                total_value: finished.total_value,
                early,
            },
        );

        Ok(finished)
    }

    /// Cancel an active reservation, freeing its unit.
    pub async fn cancel(
        &self,
        ctx: &RequestContext,
        id: ReservationId,
        reason: Option<String>,
    ) -> AppResult<Reservation> {
        let current = self.get(id).await?;
        ensure_active(&current, "cancel")?;

        let now = ctx.request_time;
        let mut cancelled = current;
        cancelled.status = ReservationStatus::Cancelled;
        cancelled.cancel_reason = reason.clone();
        cancelled.cancelled_at = Some(now);
        cancelled.updated_at = now;

        self.sink.update_reservation(id, &cancelled).await?;

        info!(
            operator = %ctx.operator,
            reservation_id = %id,
            reason = reason.as_deref().unwrap_or(""),
            "Reservation cancelled"
        );

        self.events.publish(
            ctx,
            ReservationEvent::Cancelled {
                reservation_id: id,
                reason,
            },
        );

        Ok(cancelled)
    }

    /// Remove a finished or cancelled reservation from the ledger.
    pub async fn delete(&self, ctx: &RequestContext, id: ReservationId) -> AppResult<()> {
        let current = self.get(id).await?;
        if !current.status.is_terminal() {
            return Err(AppError::invalid_state(format!(
                "Reservation {id} is {}; cancel or check it out before deleting",
                current.status
            )));
        }

        self.sink.delete_reservation(id).await?;

        info!(
            operator = %ctx.operator,
            reservation_id = %id,
            status = %current.status,
            "Reservation deleted"
        );

        self.events
            .publish(ctx, ReservationEvent::Deleted { reservation_id: id });
        Ok(())
    }

    /// Fetch one reservation.
    pub async fn get(&self, id: ReservationId) -> AppResult<Reservation> {
        self.source
            .find_reservation(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {id} not found")))
    }

    /// List reservations matching `filter`.
    pub async fn list(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        self.source.list_reservations(filter).await
    }
}

fn ensure_active(reservation: &Reservation, action: &str) -> AppResult<()> {
    if reservation.status != ReservationStatus::Active {
        return Err(AppError::invalid_state(format!(
            "Cannot {action} reservation {}: it is {}",
            reservation.id, reservation.status
        )));
    }
    Ok(())
}
