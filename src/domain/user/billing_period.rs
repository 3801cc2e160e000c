//! Billing cadence for premium plans.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// How often a premium plan renews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
}

impl BillingPeriod {
    /// Parses a billing period, ignoring surrounding whitespace and case.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(BillingPeriod::Monthly),
            "yearly" => Ok(BillingPeriod::Yearly),
            "" => Err(ValidationError::empty_field("billing_period")),
            other => Err(ValidationError::invalid_format(
                "billing_period",
                format!("unknown billing period '{}'", other),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "monthly",
            BillingPeriod::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
