//! Occupancy dashboard.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use pawhotel_core::error::AppError;
use pawhotel_core::result::AppResult;
use pawhotel_database::store::{KennelInventory, ReservationSource};
use pawhotel_entity::kennel::AccommodationType;
use pawhotel_entity::reservation::{ReservationFilter, StayDates};

/// Occupancy of one accommodation type on one night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyRow {
    /// Accommodation type.
    pub accommodation_type: AccommodationType,
    /// Provisioned units.
    pub total_units: usize,
    /// Units held by an active stay that night.
    pub occupied: usize,
    /// Provisioned units not held.
    pub free: usize,
}

/// Reports how full each accommodation type is.
#[derive(Clone)]
pub struct OccupancyService {
    reservations: Arc<dyn ReservationSource>,
    inventory: Arc<dyn KennelInventory>,
}

impl std::fmt::Debug for OccupancyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OccupancyService").finish_non_exhaustive()
    }
}

impl OccupancyService {
    /// Creates a new occupancy service.
    pub fn new(
        reservations: Arc<dyn ReservationSource>,
        inventory: Arc<dyn KennelInventory>,
    ) -> Self {
        Self {
            reservations,
            inventory,
        }
    }

    /// One row per accommodation type for the night starting on `date`.
    pub async fn snapshot(&self, date: NaiveDate) -> AppResult<Vec<OccupancyRow>> {
        let next = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| AppError::invalid_range(format!("Date {date} is out of range")))?;
        let night = StayDates::new(date, next)?;

        let mut rows = Vec::with_capacity(AccommodationType::ALL.len());
        for accommodation_type in AccommodationType::ALL {
            let units = self
                .inventory
                .list_kennel_units(Some(accommodation_type))
                .await?;
            let provisioned: BTreeSet<i32> = units.iter().map(|u| u.number).collect();

            let filter = ReservationFilter::active_of_type(accommodation_type).overlapping(night);
            let snapshot = self.reservations.list_reservations(&filter).await?;
            let held: BTreeSet<i32> = snapshot
                .iter()
                .filter(|r| r.status.holds_unit() && r.stay().covers_night(date))
                .map(|r| r.kennel_number)
                .collect();
            let occupied = held.intersection(&provisioned).count();

            rows.push(OccupancyRow {
                accommodation_type,
                total_units: provisioned.len(),
                occupied,
                free: provisioned.len() - occupied,
            });
        }

        debug!(%date, "Built occupancy snapshot");
        Ok(rows)
    }
}
