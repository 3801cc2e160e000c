//! RecordPaymentHandler - Command handler for a captured subscription payment.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::load::load_user;
use crate::domain::foundation::UserId;
use crate::domain::user::{BillingPolicy, Currency, Money, Subscription, UserError};
use crate::ports::{Clock, UserRepository};

/// Command to record a payment the billing provider has already captured.
#[derive(Debug, Clone)]
pub struct RecordPaymentCommand {
    pub user_id: UserId,
    pub amount_cents: i64,
    /// ISO code; empty means USD.
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct RecordPaymentResult {
    pub subscription: Subscription,
}

pub struct RecordPaymentHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    policy: BillingPolicy,
}

impl RecordPaymentHandler {
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
        cmd: RecordPaymentCommand,
    ) -> Result<RecordPaymentResult, UserError> {
        if cmd.amount_cents < 0 {
            return Err(UserError::validation(
                "amount",
                "payment amount cannot be negative",
            ));
        }
        let amount = Money::new(cmd.amount_cents, Currency::parse(&cmd.currency)?);

        let user = load_user(self.repository.as_ref(), &cmd.user_id).await?;
        let now = self.clock.now();

        let subscription = user
            .subscription
            .process_payment(amount, now, &self.policy);

        self.repository
            .put(&cmd.user_id, &user.with_subscription(subscription.clone(), now))
            .await?;

        info!(
            user_id = %cmd.user_id,
            amount = %amount,
            expires_at = ?subscription.expires_at(),
            "Payment recorded"
        );

        Ok(RecordPaymentResult { subscription })
    }
}
