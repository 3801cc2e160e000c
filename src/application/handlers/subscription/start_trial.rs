//! StartTrialHandler - Command handler for opening a trial window.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::load::load_user;
use crate::domain::foundation::UserId;
use crate::domain::user::{BillingPolicy, Subscription, UserError};
use crate::ports::{Clock, UserRepository};

#[derive(Debug, Clone)]
pub struct StartTrialCommand {
    pub user_id: UserId,
    /// Trial length in days. `None` uses the configured default.
    pub days: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct StartTrialResult {
    pub subscription: Subscription,
}

pub struct StartTrialHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    policy: BillingPolicy,
}

impl StartTrialHandler {
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

    pub async fn handle(&self, cmd: StartTrialCommand) -> Result<StartTrialResult, UserError> {
        if let Some(days) = cmd.days {
            if days == 0 || days > BillingPolicy::MAX_TRIAL_DAYS {
                return Err(UserError::validation(
                    "days",
                    format!(
                        "trial length must be between 1 and {} days, got {}",
                        BillingPolicy::MAX_TRIAL_DAYS,
                        days
                    ),
                ));
            }
        }

        let user = load_user(self.repository.as_ref(), &cmd.user_id).await?;
        let now = self.clock.now();

        let subscription = match cmd.days {
            Some(days) => user.subscription.start_trial(days, now),
            None => user.subscription.start_default_trial(now, &self.policy),
        };

        self.repository
            .put(&cmd.user_id, &user.with_subscription(subscription.clone(), now))
            .await?;

        info!(
            user_id = %cmd.user_id,
            trial_ends_at = ?subscription.trial_ends_at,
            "Trial started"
        );

        Ok(StartTrialResult { subscription })
    }
}
