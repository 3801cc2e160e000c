//! Per-user training statistics: the streak plus lifetime totals.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{Streak, StreakError, StreakPolicy, Totals, Weight, WorkoutDuration};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub streak: Streak,
    pub totals: Totals,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Stats {
    pub fn new(now: Timestamp, policy: &StreakPolicy) -> Self {
        Self {
            streak: Streak::new(policy),
            totals: Totals::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Records a finished workout: totals grow and the streak counts the activity.
    pub fn record_workout(&self, at: Timestamp, volume: Weight, duration: WorkoutDuration) -> Self {
        Self {
            streak: self.streak.record_activity(at),
            totals: self.totals.record_workout(volume, duration),
            updated_at: at.max(self.updated_at),
            ..*self
        }
    }

    pub fn update_rest_days(
        &self,
        days: i32,
        now: Timestamp,
        policy: &StreakPolicy,
    ) -> Result<Self, StreakError> {
        Ok(Self {
            streak: self.streak.update_rest_days(days, policy)?,
            updated_at: now,
            ..*self
        })
    }

    pub fn break_streak(&self, now: Timestamp) -> Self {
        Self {
            streak: self.streak.break_streak(),
            updated_at: now,
            ..*self
        }
    }
}
