//! Default rates by species and default add-on fees.

use serde::{Deserialize, Serialize};

use pawhotel_core::config::PricingConfig;
use pawhotel_core::types::Money;
use pawhotel_entity::animal::Species;
use pawhotel_entity::reservation::AddOn;

/// An add-on as requested by the operator. A missing value means "use
/// the configured fee".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnRequest {
    /// Whether the service is wanted.
    pub enabled: bool,
    /// Explicit fee, if any.
    pub value: Option<Money>,
}

impl AddOnRequest {
    /// Request the service at the configured fee.
    pub fn default_fee() -> Self {
        Self {
            enabled: true,
            value: None,
        }
    }

    /// Request the service at `value`.
    pub fn at(value: Money) -> Self {
        Self {
            enabled: true,
            value: Some(value),
        }
    }
}

/// Resolves defaults from the pricing configuration.
#[derive(Debug, Clone, Default)]
pub struct RateCard {
    config: PricingConfig,
}

impl RateCard {
    /// Creates a rate card from configuration.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Default daily rate for a species.
    pub fn daily_rate_for(&self, species: Species) -> Money {
        match species {
            Species::Dog => self.config.dog_daily_rate,
            Species::Cat => self.config.cat_daily_rate,
        }
    }

    /// Resolve a transport request.
    pub fn transport(&self, request: AddOnRequest) -> AddOn {
        resolve(request, self.config.transport_fee)
    }

    /// Resolve a bath request.
    pub fn bath(&self, request: AddOnRequest) -> AddOn {
        resolve(request, self.config.bath_fee)
    }
}

fn resolve(request: AddOnRequest, default_fee: Money) -> AddOn {
    if !request.enabled {
        return AddOn {
            enabled: false,
            value: request.value.unwrap_or(Money::ZERO),
        };
    }
    AddOn::enabled(request.value.unwrap_or(default_fee))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_by_species() {
        let card = RateCard::default();
        assert_eq!(card.daily_rate_for(Species::Dog), Money::from_units(50));
        assert_eq!(card.daily_rate_for(Species::Cat), Money::from_units(40));
    }

    #[test]
    fn test_add_on_defaults() {
        let card = RateCard::default();
        assert_eq!(
            card.transport(AddOnRequest::default_fee()),
            AddOn::enabled(Money::from_units(28))
        );
        assert_eq!(
            card.bath(AddOnRequest::at(Money::from_units(35))),
            AddOn::enabled(Money::from_units(35))
        );
        assert_eq!(card.bath(AddOnRequest::default()).charge(), Money::ZERO);
    }
}
