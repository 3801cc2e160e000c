//! GetSubscriptionHandler - Query handler for the current subscription view.
//!
//! Runs the lazy expiry check before reading, so a subscription that has
//! run out is never reported as Premium.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::process_expiry::resolve_expiry;
use crate::application::handlers::load::load_user;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{BillingPeriod, BillingPolicy, Payment, Plan, Subscription, UserError};
use crate::ports::{Clock, UserRepository};

#[derive(Debug, Clone)]
pub struct GetSubscriptionQuery {
    pub user_id: UserId,
}

/// Read model with the derived values computed at query time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionView {
    pub plan: Plan,
    pub billing_period: Option<BillingPeriod>,
    pub expires_at: Option<Timestamp>,
    pub auto_renew: bool,
    pub cancelled_at: Option<Timestamp>,
    pub last_payment: Option<Payment>,
    pub trial_ends_at: Option<Timestamp>,
    pub in_trial: bool,
    pub days_until_expiry: i64,
    pub seconds_remaining: i64,
    pub has_expired: bool,
}

impl SubscriptionView {
    pub fn at(subscription: &Subscription, now: Timestamp) -> Self {
        Self {
            plan: subscription.plan(),
            billing_period: subscription.billing_period(),
            expires_at: subscription.expires_at(),
            auto_renew: subscription.auto_renew,
            cancelled_at: subscription.cancelled_at,
            last_payment: subscription.last_payment,
            trial_ends_at: subscription.trial_ends_at,
            in_trial: subscription.in_trial(now),
            days_until_expiry: subscription.days_until_expiry(now),
            seconds_remaining: subscription.time_remaining(now).num_seconds(),
            has_expired: subscription.has_expired(now),
        }
    }
}

pub struct GetSubscriptionHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    policy: BillingPolicy,
}

impl GetSubscriptionHandler {
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

    pub async fn handle(&self, query: GetSubscriptionQuery) -> Result<SubscriptionView, UserError> {
        let user = load_user(self.repository.as_ref(), &query.user_id).await?;
        let now = self.clock.now();

        let (outcome, updated) = resolve_expiry(&user, now, &self.policy);
        let subscription = match updated {
            Some(updated) => {
                self.repository.put(&query.user_id, &updated).await?;
                info!(user_id = %query.user_id, outcome = ?outcome, "Expiry resolved on read");
                updated.subscription
            }
            None => {
                debug!(user_id = %query.user_id, "Subscription read");
                user.subscription
            }
        };

        Ok(SubscriptionView::at(&subscription, now))
    }
}
