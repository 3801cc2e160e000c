//! UpgradePlanHandler - Command handler for moving a Basic subscription to Premium.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::load::load_user;
use crate::domain::foundation::UserId;
use crate::domain::user::{BillingPeriod, BillingPolicy, Plan, Subscription, UserError};
use crate::ports::{Clock, UserRepository};

/// Command to upgrade a user's plan.
///
/// `plan` and `billing_period` are raw request values and are parsed here.
#[derive(Debug, Clone)]
pub struct UpgradePlanCommand {
    pub user_id: UserId,
    pub plan: String,
    pub billing_period: String,
}

/// Result of a successful upgrade.
#[derive(Debug, Clone)]
pub struct UpgradePlanResult {
    pub subscription: Subscription,
}

pub struct UpgradePlanHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    policy: BillingPolicy,
}

impl UpgradePlanHandler {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        policy: BillingPolicy,
    ) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    pub async fn handle(&self, cmd: UpgradePlanCommand) -> Result<UpgradePlanResult, UserError> {
        let plan = Plan::parse(&cmd.plan)?;
        let period = BillingPeriod::parse(&cmd.billing_period)?;

        let user = load_user(self.repository.as_ref(), &cmd.user_id).await?;
        let now = self.clock.now();

        let subscription = user
            .subscription
            .upgrade(plan, period, now, &self.policy)
            .map_err(|e| {
                warn!(user_id = %cmd.user_id, error = %e, "Upgrade rejected");
                e
            })?;

        self.repository
            .put(&cmd.user_id, &user.with_subscription(subscription.clone(), now))
            .await?;

        info!(
            user_id = %cmd.user_id,
            billing_period = %period,
            expires_at = ?subscription.expires_at(),
            "Subscription upgraded to Premium"
        );

        Ok(UpgradePlanResult { subscription })
    }
}
