//! User domain module.
//!
//! The user aggregate and the two temporal engines it owns.
//!
//! # Module Structure
//!
//! - `subscription` - Plan tier lifecycle, billing-period arithmetic, trials
//! - `streak` - Consecutive-workout counting with a rest-day tolerance
//! - `stats` / `totals` - Training statistics wrapping the streak
//! - `plan`, `billing_period`, `money` - Value types used by the subscription
//! - `policy` - Injected durations and defaults
//! - `identity` - Username and email value types
//! - `aggregate` - The `User` aggregate
//! - `errors` - Engine and application error types

mod aggregate;
mod billing_period;
mod errors;
mod identity;
mod money;
mod plan;
mod policy;
mod stats;
mod streak;
mod subscription;
mod totals;

pub use aggregate::User;
pub use billing_period::BillingPeriod;
pub use errors::{StreakError, SubscriptionError, UserError};
pub use identity::{Email, Username};
pub use money::{Currency, Money, Payment};
pub use plan::Plan;
pub use policy::{BillingPolicy, StreakPolicy};
pub use stats::Stats;
pub use streak::{RestDays, Streak};
pub use subscription::{PlanState, Subscription};
pub use totals::{Totals, Weight, WeightUnit, WorkoutDuration};
