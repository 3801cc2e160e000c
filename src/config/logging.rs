//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use super::error::{ConfigError, ValidationError};

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, used when `RUST_LOG` is not set
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|_| ValidationError::InvalidLogFilter(self.level.clone()))
    }

    /// Installs the global subscriber.
    ///
    /// `RUST_LOG` wins over the configured level when present. Fails if a
    /// subscriber is already installed.
    pub fn init(&self) -> Result<(), ConfigError> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&self.level)
                .map_err(|_| ValidationError::InvalidLogFilter(self.level.clone()))?,
        };

        let registry = tracing_subscriber::registry().with(filter);
        match self.format {
            LogFormat::Plain => registry.with(fmt::layer()).try_init()?,
            LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info,fitrkr_athena=debug".to_string()
}
