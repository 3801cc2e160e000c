//! Subscription lifecycle.
//!
//! A subscription is a plan tier plus billing bookkeeping. It moves between
//! two states:
//!
//! | State | Trigger | Next state |
//! |---|---|---|
//! | Basic | `upgrade(Premium, period)` | Premium, auto-renew on, expiry set |
//! | Premium, auto-renew on | `process_expiry`, due | Premium, expiry extended |
//! | Premium, auto-renew off | `process_expiry`, due | Basic |
//! | Premium | `cancel` | Premium, auto-renew off |
//! | Basic | `cancel` | rejected: `AlreadyOnBasic` |
//! | Premium | `upgrade` | rejected: `UpgradeNotAvailable` |
//!
//! # Design Decisions
//!
//! - **Values in, values out**: every operation borrows the current state and
//!   returns the next one. A rejected operation returns an error and the
//!   caller still holds the untouched original.
//! - **Caller supplies time**: `now` is always a parameter.
//! - **Single writer**: there is no compare-and-swap here. Two concurrent
//!   `process_payment` calls on the same loaded snapshot lose one update
//!   (last write wins); the persistence layer must serialize mutations per user.
//! - **Renewal is clock-only**: the auto-renew branch of `process_expiry`
//!   advances the expiry without confirming a captured payment. Payment
//!   capture is a separate call.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, Timestamp};

use super::{BillingPeriod, BillingPolicy, Money, Payment, Plan, SubscriptionError};

/// Plan tier together with the fields that only exist on Premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "plan", rename_all = "lowercase")]
pub enum PlanState {
    #[default]
    Basic,
    Premium {
        billing_period: BillingPeriod,
        expires_at: Timestamp,
    },
}

impl PlanState {
    pub fn plan(&self) -> Plan {
        match self {
            PlanState::Basic => Plan::Basic,
            PlanState::Premium { .. } => Plan::Premium,
        }
    }
}

/// A user's subscription snapshot.
///
/// # Invariants
///
/// - Basic carries neither billing period nor expiry; Premium carries both
///   (enforced by `PlanState`)
/// - `started_at` never changes after creation
/// - `updated_at` moves on every successful operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(flatten)]
    pub state: PlanState,
    pub started_at: Timestamp,
    pub auto_renew: bool,
    pub cancelled_at: Option<Timestamp>,
    pub last_payment: Option<Payment>,
    pub trial_ends_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Creates the free subscription every new account starts with.
    pub fn new(now: Timestamp) -> Self {
        Self {
            state: PlanState::Basic,
            started_at: now,
            auto_renew: false,
            cancelled_at: None,
            last_payment: None,
            trial_ends_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn plan(&self) -> Plan {
        self.state.plan()
    }

    pub fn billing_period(&self) -> Option<BillingPeriod> {
        match self.state {
            PlanState::Basic => None,
            PlanState::Premium { billing_period, .. } => Some(billing_period),
        }
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        match self.state {
            PlanState::Basic => None,
            PlanState::Premium { expires_at, .. } => Some(expires_at),
        }
    }

    /// Moves a Basic subscription onto Premium.
    ///
    /// The first period starts at `now`.
    ///
    /// # Errors
    ///
    /// - `UpgradeNotAvailable` if already on Premium
    /// - `InvalidUpgradeTarget` if `target` is not Premium
    pub fn upgrade(
        &self,
        target: Plan,
        period: BillingPeriod,
        now: Timestamp,
        policy: &BillingPolicy,
    ) -> Result<Self, SubscriptionError> {
        if !self.plan().can_transition_to(&Plan::Premium) {
            return Err(SubscriptionError::UpgradeNotAvailable);
        }
        if target != Plan::Premium {
            return Err(SubscriptionError::InvalidUpgradeTarget(target));
        }

        Ok(Self {
            state: PlanState::Premium {
                billing_period: period,
                expires_at: now.plus(policy.duration(period)),
            },
            auto_renew: true,
            updated_at: now,
            ..self.clone()
        })
    }

    /// Records a payment and, on Premium, pushes the expiry out by one period.
    ///
    /// The extension starts from the current expiry, not from `now`, so
    /// early payments stack.
    pub fn process_payment(&self, amount: Money, now: Timestamp, policy: &BillingPolicy) -> Self {
        let paid = Self {
            last_payment: Some(Payment { at: now, amount }),
            updated_at: now,
            ..self.clone()
        };
        paid.renew(now, policy)
    }

    /// Resolves a due expiry: renews when auto-renew is on, otherwise drops to Basic.
    ///
    /// Not yet due (`now < expires_at`) and Basic subscriptions come back
    /// unchanged. History fields (`cancelled_at`, `last_payment`,
    /// `trial_ends_at`) survive a downgrade.
    pub fn process_expiry(&self, now: Timestamp, policy: &BillingPolicy) -> Self {
        let Some(expires_at) = self.expires_at() else {
            return self.clone();
        };
        if now.is_before(&expires_at) {
            return self.clone();
        }

        if self.auto_renew {
            return self.renew(now, policy);
        }

        Self {
            state: PlanState::Basic,
            updated_at: now,
            ..self.clone()
        }
    }

    /// Extends the expiry by one billing period from its current value. No-op on Basic.
    pub fn renew(&self, now: Timestamp, policy: &BillingPolicy) -> Self {
        match self.billing_period() {
            Some(period) => self.extend_expiry(policy.duration(period), now),
            None => self.clone(),
        }
    }

    /// Pushes the expiry out by `duration`. No-op on Basic.
    pub fn extend_expiry(&self, duration: Duration, now: Timestamp) -> Self {
        match self.state {
            PlanState::Basic => self.clone(),
            PlanState::Premium {
                billing_period,
                expires_at,
            } => Self {
                state: PlanState::Premium {
                    billing_period,
                    expires_at: expires_at.plus(duration),
                },
                updated_at: now,
                ..self.clone()
            },
        }
    }

    /// Declines the next renewal. The plan stays Premium until the paid
    /// period runs out and `process_expiry` lapses it.
    ///
    /// # Errors
    ///
    /// - `AlreadyOnBasic` if there is nothing to cancel
    pub fn cancel(&self, now: Timestamp) -> Result<Self, SubscriptionError> {
        if self.plan() == Plan::Basic {
            return Err(SubscriptionError::AlreadyOnBasic);
        }

        Ok(Self {
            auto_renew: false,
            cancelled_at: Some(now),
            updated_at: now,
            ..self.clone()
        })
    }

    /// Sets the trial end `days` days from `now`, whatever the plan.
    ///
    /// Granting features during a trial is up to whoever reads `trial_ends_at`.
    pub fn start_trial(&self, days: u32, now: Timestamp) -> Self {
        self.start_trial_for(Duration::hours(i64::from(days) * 24), now)
    }

    /// Starts a trial of the policy's default length.
    pub fn start_default_trial(&self, now: Timestamp, policy: &BillingPolicy) -> Self {
        self.start_trial_for(policy.trial_duration(), now)
    }

    fn start_trial_for(&self, length: Duration, now: Timestamp) -> Self {
        Self {
            trial_ends_at: Some(now.plus(length)),
            updated_at: now,
            ..self.clone()
        }
    }

    /// Whole days until expiry, floored. Negative once expired, 0 on Basic.
    ///
    /// Unlike the streak's runway, this is not clamped: a negative value says
    /// how overdue the subscription is.
    pub fn days_until_expiry(&self, now: Timestamp) -> i64 {
        self.expires_at()
            .map_or(0, |expires_at| expires_at.whole_days_since(&now))
    }

    /// True once `now` is strictly past the expiry. Always false on Basic.
    pub fn has_expired(&self, now: Timestamp) -> bool {
        self.expires_at()
            .is_some_and(|expires_at| now.is_after(&expires_at))
    }

    /// Time left before expiry, negative once expired, zero on Basic.
    pub fn time_remaining(&self, now: Timestamp) -> Duration {
        self.expires_at()
            .map_or(Duration::zero(), |expires_at| expires_at.duration_since(&now))
    }

    /// True while a trial window is open.
    pub fn in_trial(&self, now: Timestamp) -> bool {
        self.trial_ends_at
            .is_some_and(|ends_at| now.is_before(&ends_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Currency;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000).unwrap()
    }

    fn policy() -> BillingPolicy {
        BillingPolicy::default()
    }

    fn premium_monthly() -> Subscription {
        Subscription::new(t0())
            .upgrade(Plan::Premium, BillingPeriod::Monthly, t0(), &policy())
            .unwrap()
    }

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::Usd)
    }

    fn assert_plan_invariant(sub: &Subscription) {
        match sub.plan() {
            Plan::Basic => {
                assert!(sub.billing_period().is_none());
                assert!(sub.expires_at().is_none());
            }
            Plan::Premium => {
                assert!(sub.billing_period().is_some());
                assert!(sub.expires_at().is_some());
            }
        }
    }

    // Construction

    #[test]
    fn new_subscription_is_basic() {
        let sub = Subscription::new(t0());
        assert_eq!(sub.plan(), Plan::Basic);
        assert!(!sub.auto_renew);
        assert_eq!(sub.started_at, t0());
        assert_plan_invariant(&sub);
    }

    // Upgrade

    #[test]
    fn upgrade_monthly_sets_thirty_day_expiry() {
        let sub = premium_monthly();
        assert_eq!(sub.plan(), Plan::Premium);
        assert_eq!(sub.billing_period(), Some(BillingPeriod::Monthly));
        assert_eq!(sub.expires_at(), Some(t0().add_days(30)));
        assert!(sub.auto_renew);
        assert_plan_invariant(&sub);
    }

    #[test]
    fn upgrade_yearly_sets_365_day_expiry() {
        let sub = Subscription::new(t0())
            .upgrade(Plan::Premium, BillingPeriod::Yearly, t0(), &policy())
            .unwrap();
        assert_eq!(sub.expires_at(), Some(t0().add_days(365)));
    }

    #[test]
    fn upgrade_uses_the_injected_policy() {
        let short = BillingPolicy {
            monthly_days: 3,
            ..BillingPolicy::default()
        };
        let sub = Subscription::new(t0())
            .upgrade(Plan::Premium, BillingPeriod::Monthly, t0(), &short)
            .unwrap();
        assert_eq!(sub.expires_at(), Some(t0().add_days(3)));
    }

    #[test]
    fn upgrade_from_premium_is_rejected_without_change() {
        let sub = premium_monthly();
        let before = sub.clone();
        let result = sub.upgrade(Plan::Premium, BillingPeriod::Yearly, t0().add_days(1), &policy());
        assert_eq!(result, Err(SubscriptionError::UpgradeNotAvailable));
        assert_eq!(sub, before);
    }

    #[test]
    fn upgrade_to_basic_is_invalid_target() {
        let sub = Subscription::new(t0());
        let result = sub.upgrade(Plan::Basic, BillingPeriod::Monthly, t0(), &policy());
        assert_eq!(result, Err(SubscriptionError::InvalidUpgradeTarget(Plan::Basic)));
        assert_eq!(sub.plan(), Plan::Basic);
    }

    #[test]
    fn not_available_takes_precedence_over_invalid_target() {
        let result = premium_monthly().upgrade(Plan::Basic, BillingPeriod::Monthly, t0(), &policy());
        assert_eq!(result, Err(SubscriptionError::UpgradeNotAvailable));
    }

    #[test]
    fn upgrade_keeps_started_at() {
        let later = t0().add_days(10);
        let sub = Subscription::new(t0())
            .upgrade(Plan::Premium, BillingPeriod::Monthly, later, &policy())
            .unwrap();
        assert_eq!(sub.started_at, t0());
        assert_eq!(sub.updated_at, later);
    }

    // Payments

    #[test]
    fn payment_extends_from_current_expiry() {
        let sub = premium_monthly();
        let paid = sub.process_payment(usd(999), t0().add_days(5), &policy());

        assert_eq!(paid.expires_at(), Some(t0().add_days(60)));
        let payment = paid.last_payment.unwrap();
        assert_eq!(payment.amount.amount_cents, 999);
        assert_eq!(payment.amount.currency, Currency::Usd);
        assert_eq!(payment.at, t0().add_days(5));
    }

    #[test]
    fn early_payments_stack() {
        let sub = premium_monthly()
            .process_payment(usd(999), t0(), &policy())
            .process_payment(usd(999), t0(), &policy());
        assert_eq!(sub.expires_at(), Some(t0().add_days(90)));
    }

    #[test]
    fn payment_on_basic_only_records_payment() {
        let sub = Subscription::new(t0());
        let paid = sub.process_payment(usd(500), t0().add_days(1), &policy());
        assert_eq!(paid.plan(), Plan::Basic);
        assert!(paid.expires_at().is_none());
        assert!(paid.last_payment.is_some());
        assert_eq!(paid.updated_at, t0().add_days(1));
        assert_plan_invariant(&paid);
    }

    #[test]
    fn payment_does_not_validate_amount() {
        let paid = premium_monthly().process_payment(usd(-100), t0(), &policy());
        assert_eq!(paid.last_payment.unwrap().amount.amount_cents, -100);
        assert_eq!(paid.expires_at(), Some(t0().add_days(60)));
    }

    #[test]
    fn payment_leaves_plan_and_period_alone() {
        let paid = premium_monthly().process_payment(usd(999), t0(), &policy());
        assert_eq!(paid.plan(), Plan::Premium);
        assert_eq!(paid.billing_period(), Some(BillingPeriod::Monthly));
        assert!(paid.auto_renew);
    }

    // Expiry

    #[test]
    fn expiry_before_due_is_noop() {
        let sub = premium_monthly();
        let now = t0().add_days(29);
        assert_eq!(sub.process_expiry(now, &policy()), sub);
        assert_eq!(sub.process_expiry(now, &policy()).process_expiry(now, &policy()), sub);
    }

    #[test]
    fn expiry_on_basic_is_noop() {
        let sub = Subscription::new(t0());
        assert_eq!(sub.process_expiry(t0().add_days(400), &policy()), sub);
    }

    #[test]
    fn due_expiry_with_auto_renew_extends() {
        let sub = premium_monthly();
        let renewed = sub.process_expiry(t0().add_days(30), &policy());
        assert_eq!(renewed.plan(), Plan::Premium);
        assert_eq!(renewed.expires_at(), Some(t0().add_days(60)));
    }

    #[test]
    fn cancelled_subscription_lapses_to_basic() {
        let sub = premium_monthly().cancel(t0().add_days(3)).unwrap();
        let lapsed = sub.process_expiry(t0().add_days(31), &policy());

        assert_eq!(lapsed.plan(), Plan::Basic);
        assert!(lapsed.billing_period().is_none());
        assert!(lapsed.expires_at().is_none());
        assert_eq!(lapsed.cancelled_at, Some(t0().add_days(3)));
        assert_plan_invariant(&lapsed);
    }

    #[test]
    fn downgrade_preserves_payment_and_trial_history() {
        let sub = premium_monthly()
            .process_payment(usd(999), t0(), &policy())
            .start_trial(14, t0())
            .cancel(t0())
            .unwrap();
        let lapsed = sub.process_expiry(t0().add_days(61), &policy());
        assert_eq!(lapsed.last_payment, sub.last_payment);
        assert_eq!(lapsed.trial_ends_at, sub.trial_ends_at);
    }

    #[test]
    fn second_downgrade_is_noop() {
        let now = t0().add_days(31);
        let lapsed = premium_monthly()
            .cancel(t0())
            .unwrap()
            .process_expiry(now, &policy());
        assert_eq!(lapsed.process_expiry(now, &policy()), lapsed);
    }

    // Cancel

    #[test]
    fn cancel_keeps_premium_until_expiry() {
        let sub = premium_monthly().cancel(t0().add_days(2)).unwrap();
        assert_eq!(sub.plan(), Plan::Premium);
        assert!(!sub.auto_renew);
        assert_eq!(sub.cancelled_at, Some(t0().add_days(2)));
        assert_eq!(sub.expires_at(), Some(t0().add_days(30)));
    }

    #[test]
    fn cancel_on_basic_is_rejected() {
        let sub = Subscription::new(t0());
        assert_eq!(sub.cancel(t0()), Err(SubscriptionError::AlreadyOnBasic));
    }

    // Renew / extend

    #[test]
    fn renew_on_basic_is_noop() {
        let sub = Subscription::new(t0());
        assert_eq!(sub.renew(t0().add_days(1), &policy()), sub);
    }

    #[test]
    fn extend_expiry_on_basic_is_noop() {
        let sub = Subscription::new(t0());
        assert_eq!(sub.extend_expiry(Duration::days(5), t0()), sub);
    }

    // Trial

    #[test]
    fn trial_is_independent_of_plan() {
        let sub = Subscription::new(t0()).start_trial(7, t0());
        assert_eq!(sub.trial_ends_at, Some(t0().add_days(7)));
        assert_eq!(sub.plan(), Plan::Basic);
        assert!(sub.in_trial(t0().add_days(6)));
        assert!(!sub.in_trial(t0().add_days(7)));
    }

    #[test]
    fn default_trial_lasts_fourteen_days() {
        let sub = Subscription::new(t0()).start_default_trial(t0(), &policy());
        assert_eq!(sub.trial_ends_at, Some(t0().add_days(14)));
    }

    // Derived queries

    #[test]
    fn basic_has_no_expiry_signals() {
        let sub = Subscription::new(t0());
        assert_eq!(sub.days_until_expiry(t0()), 0);
        assert!(!sub.has_expired(t0().add_days(1000)));
        assert_eq!(sub.time_remaining(t0()), Duration::zero());
    }

    #[test]
    fn days_until_expiry_floors_partial_days() {
        let sub = premium_monthly();
        assert_eq!(sub.days_until_expiry(t0()), 30);
        assert_eq!(sub.days_until_expiry(t0().add_hours(1)), 29);
    }

    #[test]
    fn days_until_expiry_goes_negative_when_overdue() {
        let sub = premium_monthly();
        assert_eq!(sub.days_until_expiry(t0().add_days(32)), -2);
        assert_eq!(sub.days_until_expiry(t0().add_days(30).add_hours(1)), -1);
    }

    #[test]
    fn has_expired_is_strict() {
        let sub = premium_monthly();
        let expiry = t0().add_days(30);
        assert!(!sub.has_expired(expiry));
        assert!(sub.has_expired(expiry.add_hours(1)));
    }

    #[test]
    fn time_remaining_can_be_negative() {
        let sub = premium_monthly();
        assert_eq!(sub.time_remaining(t0().add_days(31)), Duration::days(-1));
    }

    #[test]
    fn serializes_plan_tag_inline() {
        let json = serde_json::to_value(premium_monthly()).unwrap();
        assert_eq!(json["plan"], "premium");
        assert_eq!(json["billing_period"], "monthly");

        let back: Subscription = serde_json::from_value(json).unwrap();
        assert_eq!(back, premium_monthly());
    }

    #[test]
    fn oversized_durations_saturate_instead_of_panicking() {
        let huge = BillingPolicy {
            monthly_days: u32::MAX,
            yearly_days: u32::MAX,
            trial_days: u32::MAX,
        };
        let sub = Subscription::new(t0())
            .upgrade(Plan::Premium, BillingPeriod::Monthly, t0(), &huge)
            .unwrap();
        let ceiling = sub.expires_at().unwrap();
        assert!(ceiling.is_after(&t0()));

        let renewed = sub.renew(t0(), &huge);
        assert_eq!(renewed.expires_at(), Some(ceiling));
        assert_plan_invariant(&renewed);

        let trial = sub.start_trial(u32::MAX, t0());
        assert!(trial.trial_ends_at.is_some_and(|ends| ends.is_after(&t0())));
    }
}
