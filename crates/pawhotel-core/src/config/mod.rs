//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod database;
pub mod logging;
pub mod pricing;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::pricing::PricingConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`PAWHOTEL__PRICING__BATH_FEE`).
const ENV_PREFIX: &str = "PAWHOTEL";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (base file + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default rates and add-on fees.
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Reads `path`, then an optional `config/{env}` overlay where `env`
    /// comes from `PAWHOTEL_ENV`, then environment variables prefixed with
    /// `PAWHOTEL__`. Missing files are not an error.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let env = std::env::var("PAWHOTEL_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Money;

    #[test]
    fn test_defaults_without_files() {
        let config = AppConfig::load("does/not/exist").expect("defaults should load");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.pricing.transport_fee, Money::from_units(28));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml = r#"
            [pricing]
            dog_daily_rate = "65.00"
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("parse");
        assert_eq!(config.pricing.dog_daily_rate, Money::from_units(65));
        assert_eq!(config.pricing.cat_daily_rate, Money::from_units(40));
        assert_eq!(config.database.max_connections, 10);
    }
}
