//! User aggregate.
//!
//! Owns identity and profile fields plus the two state engines. The
//! engines never call each other; the aggregate just holds their snapshots
//! so a service can load, mutate and store them as one unit.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

use super::{Email, Stats, StreakPolicy, Subscription, Username};

/// User aggregate - one account with its subscription and training stats.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `username` and `email` passed their value-type checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub full_name: String,
    pub email: Email,
    pub subscription: Subscription,
    pub stats: Stats,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Creates a new account on the Basic plan with an empty streak.
    pub fn register(
        id: UserId,
        username: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        now: Timestamp,
        streak_policy: &StreakPolicy,
    ) -> Result<Self, ValidationError> {
        let username = Username::parse(username.into())?;
        let email = Email::parse(email.into())?;

        Ok(Self {
            id,
            username,
            full_name: full_name.into(),
            email,
            subscription: Subscription::new(now),
            stats: Stats::new(now, streak_policy),
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns a copy holding `subscription`.
    pub fn with_subscription(&self, subscription: Subscription, now: Timestamp) -> Self {
        Self {
            subscription,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Returns a copy holding `stats`.
    pub fn with_stats(&self, stats: Stats, now: Timestamp) -> Self {
        Self {
            stats,
            updated_at: now,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{BillingPeriod, BillingPolicy, Plan};

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000).unwrap()
    }

    fn register() -> User {
        User::register(
            UserId::new(),
            "lifter",
            "Sam Rivera",
            "sam@example.com",
            t0(),
            &StreakPolicy::default(),
        )
        .unwrap()
    }

    #[test]
    fn register_starts_on_basic_with_empty_streak() {
        let user = register();
        assert_eq!(user.subscription.plan(), Plan::Basic);
        assert_eq!(user.stats.streak.current, 0);
        assert_eq!(user.created_at, t0());
    }

    #[test]
    fn register_rejects_blank_username() {
        let result = User::register(
            UserId::new(),
            "  ",
            "",
            "x@example.com",
            t0(),
            &StreakPolicy::default(),
        );
        assert_eq!(result.unwrap_err().field(), "username");
    }

    #[test]
    fn register_rejects_blank_email() {
        let result = User::register(UserId::new(), "lifter", "", "", t0(), &StreakPolicy::default());
        assert_eq!(result.unwrap_err().field(), "email");
    }

    #[test]
    fn register_normalizes_username() {
        let user = User::register(
            UserId::new(),
            " Iron_Sam ",
            "Sam Rivera",
            "sam@example.com",
            t0(),
            &StreakPolicy::default(),
        )
        .unwrap();
        assert_eq!(user.username.as_str(), "iron_sam");
    }

    #[test]
    fn register_rejects_malformed_identity() {
        let policy = StreakPolicy::default();
        let short = User::register(UserId::new(), "ab", "", "x@example.com", t0(), &policy);
        assert!(matches!(short, Err(ValidationError::OutOfRange { .. })));

        let symbols = User::register(UserId::new(), "sam-r", "", "x@example.com", t0(), &policy);
        assert!(matches!(symbols, Err(ValidationError::InvalidFormat { .. })));

        let email = User::register(UserId::new(), "lifter", "", "sam@localhost", t0(), &policy);
        assert_eq!(email.unwrap_err().field(), "email");
    }

    #[test]
    fn with_subscription_bumps_updated_at() {
        let user = register();
        let later = t0().add_days(1);
        let upgraded = user
            .subscription
            .upgrade(Plan::Premium, BillingPeriod::Monthly, later, &BillingPolicy::default())
            .unwrap();

        let user = user.with_subscription(upgraded, later);
        assert_eq!(user.subscription.plan(), Plan::Premium);
        assert_eq!(user.updated_at, later);
        assert_eq!(user.created_at, t0());
    }
}
