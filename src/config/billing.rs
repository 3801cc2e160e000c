//! Billing configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::user::BillingPolicy;

/// Billing period and trial lengths, in days.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    #[serde(default = "default_monthly_days")]
    pub monthly_days: u32,

    #[serde(default = "default_yearly_days")]
    pub yearly_days: u32,

    #[serde(default = "default_trial_days")]
    pub trial_days: u32,
}

impl BillingConfig {
    /// Validate billing configuration
    ///
    /// Period lengths must lie in `1..=BillingPolicy::MAX_PERIOD_DAYS` and
    /// the trial in `1..=BillingPolicy::MAX_TRIAL_DAYS`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let periods = 1..=BillingPolicy::MAX_PERIOD_DAYS;
        if !periods.contains(&self.monthly_days) {
            return Err(ValidationError::InvalidBillingDays("monthly"));
        }
        if !periods.contains(&self.yearly_days) {
            return Err(ValidationError::InvalidBillingDays("yearly"));
        }
        if !(1..=BillingPolicy::MAX_TRIAL_DAYS).contains(&self.trial_days) {
            return Err(ValidationError::InvalidTrialDays);
        }
        Ok(())
    }

    /// The domain policy handed to the subscription handlers.
    pub fn policy(&self) -> BillingPolicy {
        BillingPolicy {
            monthly_days: self.monthly_days,
            yearly_days: self.yearly_days,
            trial_days: self.trial_days,
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            monthly_days: default_monthly_days(),
            yearly_days: default_yearly_days(),
            trial_days: default_trial_days(),
        }
    }
}

fn default_monthly_days() -> u32 {
    BillingPolicy::DEFAULT_MONTHLY_DAYS
}

fn default_yearly_days() -> u32 {
    BillingPolicy::DEFAULT_YEARLY_DAYS
}

fn default_trial_days() -> u32 {
    BillingPolicy::DEFAULT_TRIAL_DAYS
}
