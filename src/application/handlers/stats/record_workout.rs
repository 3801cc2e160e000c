//! RecordWorkoutHandler - Command handler for a completed workout.
//!
//! Adds the workout to the lifetime totals and counts it towards the streak.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::load::load_user;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::user::{Stats, UserError, Weight, WeightUnit, WorkoutDuration};
use crate::ports::{Clock, UserRepository};

#[derive(Debug, Clone)]
pub struct RecordWorkoutCommand {
    pub user_id: UserId,
    /// When the workout happened. `None` means now.
    pub performed_at: Option<Timestamp>,
    pub volume: f64,
    /// `"kg"`, `"lb"` or empty for kilograms.
    pub unit: String,
    pub minutes: i64,
}

#[derive(Debug, Clone)]
pub struct RecordWorkoutResult {
    pub stats: Stats,
    /// False when the workout was older than the last recorded activity
    /// and left the streak untouched.
    pub counted_towards_streak: bool,
}

pub struct RecordWorkoutHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl RecordWorkoutHandler {
    pub fn new(repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: RecordWorkoutCommand,
    ) -> Result<RecordWorkoutResult, UserError> {
        let volume = Weight::new(cmd.volume, WeightUnit::parse(&cmd.unit)?)?;
        let duration = WorkoutDuration::from_minutes(cmd.minutes)?;

        let user = load_user(self.repository.as_ref(), &cmd.user_id).await?;
        let now = self.clock.now();
        let at = cmd.performed_at.unwrap_or(now);

        let counted_towards_streak = user
            .stats
            .streak
            .last_activity_at
            .map_or(true, |last| !at.is_before(&last));
        if !counted_towards_streak {
            warn!(
                user_id = %cmd.user_id,
                performed_at = %at,
                "Workout predates last activity, streak unchanged"
            );
        }

        let stats = user.stats.record_workout(at, volume, duration);
        self.repository
            .put(&cmd.user_id, &user.with_stats(stats, now))
            .await?;

        info!(
            user_id = %cmd.user_id,
            current_streak = stats.streak.current,
            workouts = stats.totals.workouts,
            "Workout recorded"
        );

        Ok(RecordWorkoutResult {
            stats,
            counted_towards_streak,
        })
    }
}
