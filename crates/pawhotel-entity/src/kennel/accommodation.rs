//! Accommodation type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::animal::Species;

/// Category of kennel unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "accommodation_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AccommodationType {
    /// Heated indoor kennel.
    IndoorKennel,
    /// Covered outdoor run.
    OutdoorKennel,
    /// Cat suite, separated from the dog wing.
    Cattery,
}

impl AccommodationType {
    /// Every accommodation type, in display order.
    pub const ALL: [Self; 3] = [Self::IndoorKennel, Self::OutdoorKennel, Self::Cattery];

    /// Whether an animal of `species` may be housed in this type.
    pub fn accepts(&self, species: Species) -> bool {
        match (self, species) {
            (Self::IndoorKennel | Self::OutdoorKennel, Species::Dog) => true,
            (Self::Cattery, Species::Cat) => true,
            (Self::IndoorKennel | Self::OutdoorKennel, Species::Cat) => false,
            (Self::Cattery, Species::Dog) => false,
        }
    }

    /// Return the type as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IndoorKennel => "indoor_kennel",
            Self::OutdoorKennel => "outdoor_kennel",
            Self::Cattery => "cattery",
        }
    }
}

impl fmt::Display for AccommodationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccommodationType {
    type Err = pawhotel_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "indoor_kennel" | "indoor" => Ok(Self::IndoorKennel),
            "outdoor_kennel" | "outdoor" => Ok(Self::OutdoorKennel),
            "cattery" => Ok(Self::Cattery),
            _ => Err(pawhotel_core::AppError::validation(format!(
                "Invalid accommodation type: '{s}'. Expected one of: indoor_kennel, outdoor_kennel, cattery"
            ))),
        }
    }
}
