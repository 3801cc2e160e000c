//! Subscription lifecycle handlers.

mod cancel_subscription;
mod get_subscription;
mod process_expiry;
mod record_payment;
mod start_trial;
mod upgrade_plan;

pub use cancel_subscription::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, CancelSubscriptionResult,
};
pub use get_subscription::{GetSubscriptionHandler, GetSubscriptionQuery, SubscriptionView};
pub use process_expiry::{
    ExpiryOutcome, ProcessExpiryCommand, ProcessExpiryHandler, ProcessExpiryResult,
    SweepExpiredSubscriptionsHandler, SweepResult,
};
pub use record_payment::{RecordPaymentCommand, RecordPaymentHandler, RecordPaymentResult};
pub use start_trial::{StartTrialCommand, StartTrialHandler, StartTrialResult};
pub use upgrade_plan::{UpgradePlanCommand, UpgradePlanHandler, UpgradePlanResult};
