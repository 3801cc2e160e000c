//! Tunable parameters for the subscription and streak engines.
//!
//! Built from configuration at startup and passed into every operation that
//! needs them, so tests can run the engines with arbitrary durations.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{BillingPeriod, RestDays};

/// Billing arithmetic parameters.
///
/// Periods are fixed-length day counts, not calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPolicy {
    pub monthly_days: u32,
    pub yearly_days: u32,
    pub trial_days: u32,
}

impl BillingPolicy {
    pub const DEFAULT_MONTHLY_DAYS: u32 = 30;
    pub const DEFAULT_YEARLY_DAYS: u32 = 365;
    pub const DEFAULT_TRIAL_DAYS: u32 = 14;
    /// Upper bound accepted from configuration for a billing period.
    pub const MAX_PERIOD_DAYS: u32 = 36_500;
    /// Upper bound accepted for any trial, configured or requested.
    pub const MAX_TRIAL_DAYS: u32 = 3_650;

    /// Length of one billing period.
    pub fn duration(&self, period: BillingPeriod) -> Duration {
        let days = match period {
            BillingPeriod::Monthly => self.monthly_days,
            BillingPeriod::Yearly => self.yearly_days,
        };
        Duration::hours(i64::from(days) * 24)
    }

    /// Length of the default trial.
    pub fn trial_duration(&self) -> Duration {
        Duration::hours(i64::from(self.trial_days) * 24)
    }
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            monthly_days: Self::DEFAULT_MONTHLY_DAYS,
            yearly_days: Self::DEFAULT_YEARLY_DAYS,
            trial_days: Self::DEFAULT_TRIAL_DAYS,
        }
    }
}

/// Streak parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakPolicy {
    /// Used for new streaks and whenever a reconfiguration passes `0`.
    pub default_rest_days: RestDays,
}
