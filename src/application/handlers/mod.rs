//! Application handlers.
//!
//! Each handler loads a user snapshot, applies one engine operation with the
//! current clock reading, and stores the result. Handlers assume a single
//! writer per user; concurrent writes to the same user are last-write-wins.

mod load;
pub mod stats;
pub mod subscription;
pub mod user;

#[cfg(test)]
mod test_support;

pub use stats::{
    BreakStreakCommand, BreakStreakHandler, BreakStreakResult, GetStatsHandler, GetStatsQuery,
    RecordWorkoutCommand, RecordWorkoutHandler, RecordWorkoutResult, StatsView,
    UpdateRestDaysCommand, UpdateRestDaysHandler, UpdateRestDaysResult,
};
pub use subscription::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CancelSubscriptionResult,
    ExpiryOutcome, GetSubscriptionHandler, GetSubscriptionQuery, ProcessExpiryCommand,
    ProcessExpiryHandler, ProcessExpiryResult, RecordPaymentCommand, RecordPaymentHandler,
    RecordPaymentResult, StartTrialCommand, StartTrialHandler, StartTrialResult,
    SubscriptionView, SweepExpiredSubscriptionsHandler, SweepResult, UpgradePlanCommand,
    UpgradePlanHandler, UpgradePlanResult,
};
pub use user::{
    CreateAccountCommand, CreateAccountHandler, CreateAccountResult, DeleteAccountCommand,
    DeleteAccountHandler,
};
