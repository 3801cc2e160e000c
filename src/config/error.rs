//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Logging initialization failed: {0}")]
    LoggingInit(#[from] tracing_subscriber::util::TryInitError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Billing period length out of range (1-36500 days): {0}")]
    InvalidBillingDays(&'static str),

    #[error("Trial length out of range (1-3650 days)")]
    InvalidTrialDays,

    #[error("Default rest days must be between 1 and 6, got {0}")]
    InvalidRestDays(i32),

    #[error("Invalid log filter '{0}'")]
    InvalidLogFilter(String),
}
