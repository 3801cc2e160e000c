//! Plan tier definitions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, ValidationError};

/// Subscription plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Free tier, the default for new accounts.
    #[default]
    Basic,

    /// Paid tier, always carries a billing period and an expiry.
    Premium,
}

impl Plan {
    /// Parses a plan from request input.
    ///
    /// An empty string means the default plan (Basic).
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "" | "basic" => Ok(Plan::Basic),
            "premium" => Ok(Plan::Premium),
            other => Err(ValidationError::invalid_format(
                "plan",
                format!("unknown plan '{}'", other),
            )),
        }
    }

    /// Returns true if this tier is paid.
    pub fn is_paid(&self) -> bool {
        matches!(self, Plan::Premium)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Basic => "Basic",
            Plan::Premium => "Premium",
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl StateMachine for Plan {
    const FIELD: &'static str = "plan";

    fn can_transition_to(&self, target: &Self) -> bool {
        use Plan::*;
        matches!(
            (self, target),
            // Upgrade
            (Basic, Premium)
            // Lapse after a declined renewal
                | (Premium, Basic)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Plan::Basic => vec![Plan::Premium],
            Plan::Premium => vec![Plan::Basic],
        }
    }
}
