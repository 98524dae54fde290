//! Animal species enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::kennel::AccommodationType;

/// Species of a guest animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "species", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Canine guest.
    Dog,
    /// Feline guest.
    Cat,
}

impl Species {
    /// Accommodation types that accept this species.
    pub fn allowed_accommodations(&self) -> Vec<AccommodationType> {
        AccommodationType::ALL
            .into_iter()
            .filter(|t| t.accepts(*self))
            .collect()
    }

    /// Return the species as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Species {
    type Err = pawhotel_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dog" | "canine" => Ok(Self::Dog),
            "cat" | "feline" => Ok(Self::Cat),
            _ => Err(pawhotel_core::AppError::validation(format!(
                "Invalid species: '{s}'. Expected one of: dog, cat"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cats_only_in_cattery() {
        assert_eq!(
            Species::Cat.allowed_accommodations(),
            vec![AccommodationType::Cattery]
        );
        assert_eq!(
            Species::Dog.allowed_accommodations(),
            vec![
                AccommodationType::IndoorKennel,
                AccommodationType::OutdoorKennel
            ]
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Feline".parse::<Species>().unwrap(), Species::Cat);
        assert!("parrot".parse::<Species>().is_err());
    }
}
