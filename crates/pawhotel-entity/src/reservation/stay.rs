//! Half-open stay date ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pawhotel_core::AppError;

/// A stay from `checkin` (first night) up to `checkout` (departure day).
///
/// The range is half-open: the unit is free again on the checkout day, so
/// a stay ending on day D and another starting on day D do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStayDates")]
pub struct StayDates {
    pub(crate) checkin: NaiveDate,
    pub(crate) checkout: NaiveDate,
}

/// Wire shape of [`StayDates`] before the range check.
#[derive(Deserialize)]
struct RawStayDates {
    checkin: NaiveDate,
    checkout: NaiveDate,
}

impl TryFrom<RawStayDates> for StayDates {
    type Error = AppError;

    fn try_from(raw: RawStayDates) -> Result<Self, Self::Error> {
        Self::new(raw.checkin, raw.checkout)
    }
}

impl StayDates {
    /// Build a range, failing with `InvalidRange` unless `checkout > checkin`.
    pub fn new(checkin: NaiveDate, checkout: NaiveDate) -> Result<Self, AppError> {
        if checkout <= checkin {
            return Err(AppError::invalid_range(format!(
                "Checkout {checkout} must be after checkin {checkin}"
            )));
        }
        Ok(Self { checkin, checkout })
    }

    /// First night of the stay.
    pub fn checkin(&self) -> NaiveDate {
        self.checkin
    }

    /// Departure day.
    pub fn checkout(&self) -> NaiveDate {
        self.checkout
    }

    /// Billable nights: whole days between the dates, at least one.
    pub fn nights(&self) -> u32 {
        let days = (self.checkout - self.checkin).num_days().max(1);
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Half-open overlap test.
    pub fn overlaps(&self, other: &StayDates) -> bool {
        self.checkin < other.checkout && self.checkout > other.checkin
    }

    /// Whether the night starting on `date` belongs to this stay.
    pub fn covers_night(&self, date: NaiveDate) -> bool {
        self.checkin <= date && date < self.checkout
    }
}
