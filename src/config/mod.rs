//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `FITRKR` prefix and
//! nested values are separated by double underscores. Every section has
//! defaults, so an empty environment yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use fitrkr_athena::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init().expect("Failed to install subscriber");
//!
//! let billing = config.billing.policy();
//! ```

mod billing;
mod error;
mod logging;
mod streak;

pub use billing::BillingConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use streak::StreakConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Billing period and trial lengths
    #[serde(default)]
    pub billing: BillingConfig,

    /// Streak defaults
    #[serde(default)]
    pub streak: StreakConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FITRKR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `FITRKR__BILLING__MONTHLY_DAYS=30` -> `billing.monthly_days = 30`
    /// - `FITRKR__STREAK__DEFAULT_REST_DAYS=2` -> `streak.default_rest_days = 2`
    /// - `FITRKR__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FITRKR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for out-of-range billing or trial lengths,
    /// default rest days outside 1..=6, or an unparsable log filter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.billing.validate()?;
        self.streak.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
