//! Streak and workout statistics handlers.

mod break_streak;
mod get_stats;
mod record_workout;
mod update_rest_days;

pub use break_streak::{BreakStreakCommand, BreakStreakHandler, BreakStreakResult};
pub use get_stats::{GetStatsHandler, GetStatsQuery, StatsView};
pub use record_workout::{RecordWorkoutCommand, RecordWorkoutHandler, RecordWorkoutResult};
pub use update_rest_days::{UpdateRestDaysCommand, UpdateRestDaysHandler, UpdateRestDaysResult};
