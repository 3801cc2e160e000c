//! GetStatsHandler - Query handler for the training statistics view.

use std::sync::Arc;

use serde::Serialize;

use crate::application::handlers::load::load_user;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{Stats, Totals, UserError};
use crate::ports::{Clock, UserRepository};

#[derive(Debug, Clone)]
pub struct GetStatsQuery {
    pub user_id: UserId,
}

/// Streak and totals with derived values computed at query time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub rest_days: u8,
    pub last_activity_at: Option<Timestamp>,
    pub is_active: bool,
    pub days_until_expiry: u32,
    pub progress: f64,
    pub totals: Totals,
}

impl StatsView {
    pub fn at(stats: &Stats, now: Timestamp) -> Self {
        let streak = &stats.streak;
        Self {
            current_streak: streak.current,
            longest_streak: streak.longest,
            rest_days: streak.rest_days.get(),
            last_activity_at: streak.last_activity_at,
            is_active: streak.is_active(now),
            days_until_expiry: streak.days_until_expiry(now),
            progress: streak.progress(now),
            totals: stats.totals,
        }
    }
}

/// Read-only: the view reflects lapse without writing anything back.
pub struct GetStatsHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl GetStatsHandler {
    pub fn new(repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self, query: GetStatsQuery) -> Result<StatsView, UserError> {
        let user = load_user(self.repository.as_ref(), &query.user_id).await?;
        Ok(StatsView::at(&user.stats, self.clock.now()))
    }
}
