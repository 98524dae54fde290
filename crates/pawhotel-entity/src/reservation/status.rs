//! Reservation status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a reservation.
///
/// `Active` is the only status that holds a kennel unit. `Finished` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reservation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// Booked or in progress; occupies its unit.
    Active,
    /// Guest has checked out.
    Finished,
    /// Called off before completion.
    Cancelled,
}

impl ReservationStatus {
    /// Check if the reservation is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }

    /// Whether a reservation in this status counts toward occupancy.
    pub fn holds_unit(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = pawhotel_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(pawhotel_core::AppError::validation(format!(
                "Invalid reservation status: '{s}'. Expected one of: active, finished, cancelled"
            ))),
        }
    }
}
