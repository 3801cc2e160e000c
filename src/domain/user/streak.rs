//! Workout streak tracking.
//!
//! A streak counts consecutive activities, tolerating gaps of up to
//! `rest_days` days between two of them. Gaps are measured as fractional
//! days, so an activity exactly `rest_days` after the previous one still
//! continues the streak.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{StreakError, StreakPolicy};

/// Maximum tolerated gap between two activities, in whole days (1 to 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct RestDays(u8);

impl RestDays {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;
    pub const DEFAULT: RestDays = RestDays(2);

    /// Validates a rest-day count.
    ///
    /// # Errors
    ///
    /// - `InvalidRestDays` outside 1..=6 (including 0, see `resolve`)
    pub fn new(days: i32) -> Result<Self, StreakError> {
        if days < i32::from(Self::MIN) || days > i32::from(Self::MAX) {
            return Err(StreakError::InvalidRestDays(days));
        }
        Ok(Self(days as u8))
    }

    /// Validates request input, where `0` means "use the default".
    pub fn resolve(days: i32, default: RestDays) -> Result<Self, StreakError> {
        if days == 0 {
            return Ok(default);
        }
        Self::new(days)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for RestDays {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i32> for RestDays {
    type Error = StreakError;

    fn try_from(days: i32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<RestDays> for i32 {
    fn from(days: RestDays) -> Self {
        i32::from(days.0)
    }
}

/// Consecutive-activity counter.
///
/// # Invariants
///
/// - `longest >= current`
/// - A freshly created streak has no activity and both counts at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub rest_days: RestDays,
    pub current: u32,
    pub longest: u32,
    pub last_activity_at: Option<Timestamp>,
}

impl Streak {
    /// Creates an empty streak using the policy's default rest days.
    pub fn new(policy: &StreakPolicy) -> Self {
        Self::with_rest_days(policy.default_rest_days)
    }

    pub fn with_rest_days(rest_days: RestDays) -> Self {
        Self {
            rest_days,
            current: 0,
            longest: 0,
            last_activity_at: None,
        }
    }

    /// Changes the tolerated gap. `0` resets it to the policy default.
    ///
    /// # Errors
    ///
    /// - `InvalidRestDays` outside 1..=6; the current configuration is kept
    pub fn update_rest_days(&self, days: i32, policy: &StreakPolicy) -> Result<Self, StreakError> {
        let rest_days = RestDays::resolve(days, policy.default_rest_days)?;
        Ok(Self { rest_days, ..*self })
    }

    /// Counts an activity at `at`.
    ///
    /// The first activity, or one after a gap longer than `rest_days`,
    /// starts a fresh streak of 1. Activities older than the last recorded
    /// one are ignored.
    pub fn record_activity(&self, at: Timestamp) -> Self {
        let current = match self.last_activity_at {
            None => 1,
            Some(last) if at.is_before(&last) => return *self,
            Some(last) if self.gap_exceeded(at.days_since(&last)) => 1,
            Some(_) => self.current + 1,
        };

        Self {
            current,
            longest: self.longest.max(current),
            last_activity_at: Some(at),
            ..*self
        }
    }

    /// True if an activity was recorded no more than `rest_days` ago.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.days_since_last(now)
            .is_some_and(|gap| !self.gap_exceeded(gap))
    }

    /// Whole days of runway left before the streak lapses, never negative.
    pub fn days_until_expiry(&self, now: Timestamp) -> u32 {
        let Some(last) = self.last_activity_at else {
            return 0;
        };
        let rest = i64::from(self.rest_days.get());
        let remaining = (rest - now.whole_days_since(&last)).clamp(0, rest);
        u32::try_from(remaining).unwrap_or(0)
    }

    /// Manually ends the current streak. `longest` is kept.
    pub fn break_streak(&self) -> Self {
        Self {
            current: 0,
            last_activity_at: None,
            ..*self
        }
    }

    /// Fraction of the rest window already used, in `[0, 1]`.
    ///
    /// `0` with no activity, `1` once the window is exceeded.
    pub fn progress(&self, now: Timestamp) -> f64 {
        match self.days_since_last(now) {
            None => 0.0,
            Some(gap) if self.gap_exceeded(gap) => 1.0,
            Some(gap) => (gap / f64::from(self.rest_days.get())).max(0.0),
        }
    }

    fn days_since_last(&self, now: Timestamp) -> Option<f64> {
        self.last_activity_at.map(|last| now.days_since(&last))
    }

    fn gap_exceeded(&self, gap_days: f64) -> bool {
        gap_days > f64::from(self.rest_days.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i64) -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000).unwrap().add_days(n)
    }

    fn fresh() -> Streak {
        Streak::new(&StreakPolicy::default())
    }

    // Rest days

    #[test]
    fn rest_days_accepts_one_through_six() {
        for days in 1..=6 {
            assert_eq!(RestDays::new(days).unwrap().get() as i32, days);
        }
    }

    #[test]
    fn rest_days_rejects_out_of_range() {
        assert_eq!(RestDays::new(0), Err(StreakError::InvalidRestDays(0)));
        assert_eq!(RestDays::new(7), Err(StreakError::InvalidRestDays(7)));
        assert_eq!(RestDays::new(-5), Err(StreakError::InvalidRestDays(-5)));
    }

    #[test]
    fn zero_resolves_to_default() {
        let default = RestDays::new(4).unwrap();
        assert_eq!(RestDays::resolve(0, default), Ok(default));
    }

    #[test]
    fn rest_days_deserialization_is_validated() {
        assert!(serde_json::from_str::<RestDays>("3").is_ok());
        assert!(serde_json::from_str::<RestDays>("8").is_err());
    }

    // Construction and configuration

    #[test]
    fn new_streak_is_empty_with_default_rest_days() {
        let streak = fresh();
        assert_eq!(streak.rest_days.get(), 2);
        assert_eq!(streak.current, 0);
        assert_eq!(streak.longest, 0);
        assert!(streak.last_activity_at.is_none());
    }

    #[test]
    fn update_rest_days_zero_uses_policy_default() {
        let policy = StreakPolicy {
            default_rest_days: RestDays::new(3).unwrap(),
        };
        let streak = Streak::with_rest_days(RestDays::new(5).unwrap());
        let updated = streak.update_rest_days(0, &policy).unwrap();
        assert_eq!(updated.rest_days.get(), 3);
    }

    #[test]
    fn invalid_update_keeps_prior_configuration() {
        let streak = fresh().update_rest_days(4, &StreakPolicy::default()).unwrap();
        let result = streak.update_rest_days(9, &StreakPolicy::default());
        assert_eq!(result, Err(StreakError::InvalidRestDays(9)));
        assert_eq!(streak.rest_days.get(), 4);
    }

    // Recording

    #[test]
    fn first_activity_starts_streak() {
        let streak = fresh().record_activity(day(0));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 1);
        assert_eq!(streak.last_activity_at, Some(day(0)));
    }

    #[test]
    fn gap_within_rest_days_continues() {
        let streak = fresh().record_activity(day(0)).record_activity(day(1));
        assert_eq!(streak.current, 2);
    }

    #[test]
    fn gap_exactly_on_boundary_continues() {
        let streak = fresh().record_activity(day(0)).record_activity(day(2));
        assert_eq!(streak.current, 2);
        assert_eq!(streak.longest, 2);
    }

    #[test]
    fn gap_just_past_boundary_breaks() {
        let late = day(2).add_hours(1);
        let streak = fresh().record_activity(day(0)).record_activity(late);
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 1);
    }

    #[test]
    fn broken_streak_keeps_longest() {
        let streak = fresh()
            .record_activity(day(0))
            .record_activity(day(2))
            .record_activity(day(5));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 2);
        assert_eq!(streak.last_activity_at, Some(day(5)));
    }

    #[test]
    fn longest_follows_new_high() {
        let mut streak = fresh();
        for n in 0..5 {
            streak = streak.record_activity(day(n));
        }
        assert_eq!(streak.current, 5);
        assert_eq!(streak.longest, 5);
    }

    #[test]
    fn same_instant_activity_continues() {
        let streak = fresh().record_activity(day(0)).record_activity(day(0));
        assert_eq!(streak.current, 2);
    }

    #[test]
    fn out_of_order_activity_is_ignored() {
        let streak = fresh().record_activity(day(3));
        assert_eq!(streak.record_activity(day(1)), streak);
    }

    #[test]
    fn first_activity_after_break_does_not_lower_longest() {
        let streak = fresh()
            .record_activity(day(0))
            .record_activity(day(1))
            .record_activity(day(2))
            .break_streak()
            .record_activity(day(3));
        assert_eq!(streak.current, 1);
        assert_eq!(streak.longest, 3);
    }

    // Break

    #[test]
    fn break_clears_current_and_last_activity() {
        let streak = fresh().record_activity(day(0)).record_activity(day(1)).break_streak();
        assert_eq!(streak.current, 0);
        assert_eq!(streak.longest, 2);
        assert!(streak.last_activity_at.is_none());
        assert!(!streak.is_active(day(1)));
    }

    // Queries

    #[test]
    fn empty_streak_is_never_active() {
        assert!(!fresh().is_active(day(0)));
        assert_eq!(fresh().days_until_expiry(day(0)), 0);
        assert_eq!(fresh().progress(day(0)), 0.0);
    }

    #[test]
    fn is_active_through_boundary() {
        let streak = fresh().record_activity(day(0));
        assert!(streak.is_active(day(2)));
        assert!(!streak.is_active(day(2).add_hours(1)));
    }

    #[test]
    fn days_until_expiry_counts_down_and_clamps() {
        let streak = fresh().record_activity(day(0));
        assert_eq!(streak.days_until_expiry(day(0)), 2);
        assert_eq!(streak.days_until_expiry(day(1)), 1);
        assert_eq!(streak.days_until_expiry(day(0).add_hours(36)), 1);
        assert_eq!(streak.days_until_expiry(day(2)), 0);
        assert_eq!(streak.days_until_expiry(day(10)), 0);
    }

    #[test]
    fn days_until_expiry_never_exceeds_rest_days() {
        let streak = fresh().record_activity(day(5));
        assert_eq!(streak.days_until_expiry(day(4)), 2);
        assert_eq!(streak.days_until_expiry(day(0)), 2);
    }

    #[test]
    fn progress_is_fraction_of_rest_window() {
        let streak = fresh().record_activity(day(0));
        assert_eq!(streak.progress(day(0)), 0.0);
        assert_eq!(streak.progress(day(1)), 0.5);
        assert_eq!(streak.progress(day(2)), 1.0);
        assert_eq!(streak.progress(day(4)), 1.0);
    }
}
