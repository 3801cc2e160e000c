//! CancelSubscriptionHandler - Command handler for turning off renewal.
//!
//! The user keeps Premium until the paid period ends; the expiry check
//! downgrades them afterwards.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::load::load_user;
use crate::domain::foundation::UserId;
use crate::domain::user::{Subscription, UserError};
use crate::ports::{Clock, UserRepository};

#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct CancelSubscriptionResult {
    pub subscription: Subscription,
}

pub struct CancelSubscriptionHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl CancelSubscriptionHandler {
    pub fn new(repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: CancelSubscriptionCommand,
    ) -> Result<CancelSubscriptionResult, UserError> {
        let user = load_user(self.repository.as_ref(), &cmd.user_id).await?;
        let now = self.clock.now();

        let subscription = user.subscription.cancel(now).map_err(|e| {
            warn!(user_id = %cmd.user_id, error = %e, "Cancellation rejected");
            e
        })?;

        self.repository
            .put(&cmd.user_id, &user.with_subscription(subscription.clone(), now))
            .await?;

        info!(
            user_id = %cmd.user_id,
            access_until = ?subscription.expires_at(),
            "Subscription cancelled"
        );

        Ok(CancelSubscriptionResult { subscription })
    }
}
