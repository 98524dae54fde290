//! Kennel unit entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pawhotel_core::AppError;

use super::accommodation::AccommodationType;

/// One numbered, bookable housing slot.
///
/// `(accommodation_type, number)` is unique across the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct KennelUnit {
    /// Accommodation category.
    pub accommodation_type: AccommodationType,
    /// Unit number, unique within the category.
    pub number: i32,
    /// Free-text description shown to operators.
    pub description: String,
    /// When the unit was provisioned.
    pub created_at: DateTime<Utc>,
}

impl KennelUnit {
    /// Create a unit, rejecting non-positive numbers.
    pub fn new(
        accommodation_type: AccommodationType,
        number: i32,
        description: impl Into<String>,
    ) -> Result<Self, AppError> {
        if number < 1 {
            return Err(AppError::validation(format!(
                "Kennel number must be positive (got {number})"
            )));
        }
        Ok(Self {
            accommodation_type,
            number,
            description: description.into(),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_number() {
        assert!(KennelUnit::new(AccommodationType::Cattery, 0, "").is_err());
        assert!(KennelUnit::new(AccommodationType::Cattery, -2, "").is_err());
        assert!(KennelUnit::new(AccommodationType::Cattery, 1, "Window").is_ok());
    }
}
