//! Expiry resolution handlers.
//!
//! - `ProcessExpiryHandler` - lazy check for a single user
//! - `SweepExpiredSubscriptionsHandler` - batch pass over every due subscription

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::handlers::load::load_user;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{BillingPolicy, Plan, Subscription, User, UserError};
use crate::ports::{Clock, UserRepository};

/// What an expiry check did to a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryOutcome {
    /// Basic, or Premium with time left.
    NotDue,
    /// Auto-renew pushed the expiry out by one period.
    Renewed,
    /// Dropped to Basic.
    Downgraded,
}

impl ExpiryOutcome {
    fn between(before: &Subscription, after: &Subscription) -> Self {
        if before == after {
            ExpiryOutcome::NotDue
        } else if after.plan() == Plan::Basic {
            ExpiryOutcome::Downgraded
        } else {
            ExpiryOutcome::Renewed
        }
    }
}

/// Runs the expiry check on a loaded user.
///
/// Returns the updated user only when something changed.
pub(crate) fn resolve_expiry(
    user: &User,
    now: Timestamp,
    policy: &BillingPolicy,
) -> (ExpiryOutcome, Option<User>) {
    let subscription = user.subscription.process_expiry(now, policy);
    match ExpiryOutcome::between(&user.subscription, &subscription) {
        ExpiryOutcome::NotDue => (ExpiryOutcome::NotDue, None),
        outcome => (outcome, Some(user.with_subscription(subscription, now))),
    }
}

#[derive(Debug, Clone)]
pub struct ProcessExpiryCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct ProcessExpiryResult {
    pub outcome: ExpiryOutcome,
    pub subscription: Subscription,
}

pub struct ProcessExpiryHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    policy: BillingPolicy,
}

impl ProcessExpiryHandler {
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

    pub async fn handle(
        &self,
        cmd: ProcessExpiryCommand,
    ) -> Result<ProcessExpiryResult, UserError> {
        let user = load_user(self.repository.as_ref(), &cmd.user_id).await?;
        let now = self.clock.now();

        let (outcome, updated) = resolve_expiry(&user, now, &self.policy);
        let subscription = match updated {
            Some(updated) => {
                self.repository.put(&cmd.user_id, &updated).await?;
                info!(user_id = %cmd.user_id, outcome = ?outcome, "Subscription expiry resolved");
                updated.subscription
            }
            None => {
                debug!(user_id = %cmd.user_id, "Subscription not due");
                user.subscription
            }
        };

        Ok(ProcessExpiryResult {
            outcome,
            subscription,
        })
    }
}

/// Summary of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepResult {
    pub renewed: Vec<UserId>,
    pub downgraded: Vec<UserId>,
    /// Users whose updated snapshot could not be stored.
    pub failed: Vec<UserId>,
}

/// Resolves every subscription due at the current clock reading.
///
/// A failed write for one user does not stop the sweep; the user shows up
/// in `failed` and is picked up again on the next run.
pub struct SweepExpiredSubscriptionsHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    policy: BillingPolicy,
}

impl SweepExpiredSubscriptionsHandler {
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

    pub async fn handle(&self) -> Result<SweepResult, UserError> {
        let now = self.clock.now();
        let due = self.repository.find_expiring_by(now).await?;
        let mut result = SweepResult::default();

        for user in due {
            let (outcome, Some(updated)) = resolve_expiry(&user, now, &self.policy) else {
                continue;
            };

            if let Err(e) = self.repository.put(&user.id, &updated).await {
                warn!(user_id = %user.id, error = %e, "Failed to store expiry outcome");
                result.failed.push(user.id);
                continue;
            }

            match outcome {
                ExpiryOutcome::Renewed => result.renewed.push(user.id),
                ExpiryOutcome::Downgraded => result.downgraded.push(user.id),
                ExpiryOutcome::NotDue => {}
            }
        }

        info!(
            renewed = result.renewed.len(),
            downgraded = result.downgraded.len(),
            failed = result.failed.len(),
            "Expiry sweep finished"
        );

        Ok(result)
    }
}
