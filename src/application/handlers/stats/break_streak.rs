//! BreakStreakHandler - Command handler for manually ending a streak.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::load::load_user;
use crate::domain::foundation::UserId;
use crate::domain::user::{Stats, UserError};
use crate::ports::{Clock, UserRepository};

#[derive(Debug, Clone)]
pub struct BreakStreakCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct BreakStreakResult {
    pub stats: Stats,
}

pub struct BreakStreakHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl BreakStreakHandler {
    pub fn new(repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self, cmd: BreakStreakCommand) -> Result<BreakStreakResult, UserError> {
        let user = load_user(self.repository.as_ref(), &cmd.user_id).await?;
        let now = self.clock.now();

        let stats = user.stats.break_streak(now);
        self.repository
            .put(&cmd.user_id, &user.with_stats(stats, now))
            .await?;

        info!(
            user_id = %cmd.user_id,
            ended_streak = user.stats.streak.current,
            longest = stats.streak.longest,
            "Streak broken"
        );

        Ok(BreakStreakResult { stats })
    }
}
