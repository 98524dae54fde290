//! Default rate configuration.

use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Default daily rates by species and flat add-on fees.
///
/// Used whenever a booking request leaves the rate or an enabled add-on
/// value unspecified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Daily rate for dogs.
    #[serde(default = "default_dog_rate")]
    pub dog_daily_rate: Money,
    /// Daily rate for cats.
    #[serde(default = "default_cat_rate")]
    pub cat_daily_rate: Money,
    /// Flat transport (pick-up/drop-off) fee.
    #[serde(default = "default_transport_fee")]
    pub transport_fee: Money,
    /// Flat bath/grooming fee.
    #[serde(default = "default_bath_fee")]
    pub bath_fee: Money,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            dog_daily_rate: default_dog_rate(),
            cat_daily_rate: default_cat_rate(),
            transport_fee: default_transport_fee(),
            bath_fee: default_bath_fee(),
        }
    }
}

fn default_dog_rate() -> Money {
    Money::from_units(50)
}

fn default_cat_rate() -> Money {
    Money::from_units(40)
}

fn default_transport_fee() -> Money {
    Money::from_units(28)
}

fn default_bath_fee() -> Money {
    Money::from_units(50)
}
