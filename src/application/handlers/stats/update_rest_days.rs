//! UpdateRestDaysHandler - Command handler for reconfiguring the streak tolerance.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::load::load_user;
use crate::domain::foundation::UserId;
use crate::domain::user::{Stats, StreakPolicy, UserError};
use crate::ports::{Clock, UserRepository};

#[derive(Debug, Clone)]
pub struct UpdateRestDaysCommand {
    pub user_id: UserId,
    /// `0` resets to the configured default.
    pub rest_days: i32,
}

#[derive(Debug, Clone)]
pub struct UpdateRestDaysResult {
    pub stats: Stats,
}

pub struct UpdateRestDaysHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    policy: StreakPolicy,
}

impl UpdateRestDaysHandler {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        policy: StreakPolicy,
    ) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateRestDaysCommand,
    ) -> Result<UpdateRestDaysResult, UserError> {
        let user = load_user(self.repository.as_ref(), &cmd.user_id).await?;
        let now = self.clock.now();

        let stats = user
            .stats
            .update_rest_days(cmd.rest_days, now, &self.policy)
            .map_err(|e| {
                warn!(user_id = %cmd.user_id, error = %e, "Rest days rejected");
                e
            })?;

        self.repository
            .put(&cmd.user_id, &user.with_stats(stats, now))
            .await?;

        info!(
            user_id = %cmd.user_id,
            rest_days = stats.streak.rest_days.get(),
            "Rest days updated"
        );

        Ok(UpdateRestDaysResult { stats })
    }
}
