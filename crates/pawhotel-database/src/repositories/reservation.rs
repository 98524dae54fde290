//! Reservation repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, warn};

use pawhotel_core::error::AppError;
use pawhotel_core::result::AppResult;
use pawhotel_core::types::ReservationId;
use pawhotel_entity::reservation::{Reservation, ReservationFilter, ReservationStatus};

use crate::error::map_sqlx_error;
use crate::store::{ReservationSink, ReservationSource};

/// Repository for the `reservations` table.
///
/// Overlap protection at commit time comes from the
/// `reservations_no_overlap` exclusion constraint; a violation surfaces as
/// `Conflict`. Updates only match rows that are still `active`, so a
/// finished or cancelled reservation is never overwritten.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Why a guarded update touched no row: the id is unknown, or the row
    /// was closed by a concurrent writer.
    async fn explain_missed_update(&self, id: ReservationId) -> AppError {
        let status = sqlx::query_scalar::<_, ReservationStatus>(
            "SELECT status FROM reservations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match status {
            Ok(Some(status)) => {
                warn!(reservation_id = %id, %status, "Rejected write to closed reservation");
                AppError::invalid_state(format!("Reservation {id} is already {status}"))
            }
            Ok(None) => AppError::not_found(format!("Reservation {id} not found")),
            Err(e) => map_sqlx_error("Failed to read reservation status", e),
        }
    }
}

#[async_trait]
impl ReservationSource for ReservationRepository {
    async fn list_reservations(&self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM reservations WHERE TRUE");

        if let Some(accommodation_type) = filter.accommodation_type {
            query
                .push(" AND accommodation_type = ")
                .push_bind(accommodation_type);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(range) = filter.date_range {
            query
                .push(" AND checkin_date < ")
                .push_bind(range.checkout())
                .push(" AND checkout_date > ")
                .push_bind(range.checkin());
        }
        query.push(" ORDER BY checkin_date, kennel_number");

        let rows = query
            .build_query_as::<Reservation>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to list reservations", e))?;

        debug!(count = rows.len(), ?filter, "Listed reservations");
        Ok(rows)
    }

    async fn find_reservation(&self, id: ReservationId) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find reservation", e))
    }
}

#[async_trait]
impl ReservationSink for ReservationRepository {
    async fn insert_reservation(&self, r: &Reservation) -> AppResult<ReservationId> {
        sqlx::query_scalar::<_, ReservationId>(
            "INSERT INTO reservations (id, animal_id, accommodation_type, kennel_number, \
             checkin_date, checkout_date, daily_rate, total_days, transport_service, \
             transport_value, bath_service, bath_value, payment_method, total_value, status, \
             cancel_reason, created_at, updated_at, finished_at, cancelled_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
             $17, $18, $19, $20) RETURNING id",
        )
        .bind(r.id)
        .bind(r.animal_id)
        .bind(r.accommodation_type)
        .bind(r.kennel_number)
        .bind(r.checkin_date)
        .bind(r.checkout_date)
        .bind(r.daily_rate)
        .bind(r.total_days)
        .bind(r.transport_service)
        .bind(r.transport_value)
        .bind(r.bath_service)
        .bind(r.bath_value)
        .bind(r.payment_method)
        .bind(r.total_value)
        .bind(r.status)
        .bind(&r.cancel_reason)
        .bind(r.created_at)
        .bind(r.updated_at)
        .bind(r.finished_at)
        .bind(r.cancelled_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to insert reservation", e))
    }

    async fn update_reservation(&self, id: ReservationId, r: &Reservation) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE reservations SET accommodation_type = $2, kennel_number = $3, \
             checkin_date = $4, checkout_date = $5, daily_rate = $6, total_days = $7, \
             transport_service = $8, transport_value = $9, bath_service = $10, bath_value = $11, \
             payment_method = $12, total_value = $13, status = $14, cancel_reason = $15, \
             updated_at = $16, finished_at = $17, cancelled_at = $18 \
             WHERE id = $1 AND status = 'active'",
        )
        .bind(id)
        .bind(r.accommodation_type)
        .bind(r.kennel_number)
        .bind(r.checkin_date)
        .bind(r.checkout_date)
        .bind(r.daily_rate)
        .bind(r.total_days)
        .bind(r.transport_service)
        .bind(r.transport_value)
        .bind(r.bath_service)
        .bind(r.bath_value)
        .bind(r.payment_method)
        .bind(r.total_value)
        .bind(r.status)
        .bind(&r.cancel_reason)
        .bind(r.updated_at)
        .bind(r.finished_at)
        .bind(r.cancelled_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update reservation", e))?;

        if result.rows_affected() == 0 {
            return Err(self.explain_missed_update(id).await);
        }
        Ok(())
    }

    async fn delete_reservation(&self, id: ReservationId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete reservation", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Reservation {id} not found")));
        }
        Ok(())
    }
}
