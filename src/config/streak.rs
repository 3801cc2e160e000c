//! Streak configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::user::{RestDays, StreakPolicy};

#[derive(Debug, Clone, Deserialize)]
pub struct StreakConfig {
    /// Rest days given to new streaks and to reconfigurations that pass `0`.
    #[serde(default = "default_rest_days")]
    pub default_rest_days: i32,
}

impl StreakConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.policy().map(|_| ())
    }

    /// The domain policy handed to the streak handlers.
    pub fn policy(&self) -> Result<StreakPolicy, ValidationError> {
        let default_rest_days = RestDays::new(self.default_rest_days)
            .map_err(|_| ValidationError::InvalidRestDays(self.default_rest_days))?;
        Ok(StreakPolicy { default_rest_days })
    }
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            default_rest_days: default_rest_days(),
        }
    }
}

fn default_rest_days() -> i32 {
    i32::from(RestDays::DEFAULT.get())
}
