//! User-domain error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | DuplicateUsername / DuplicateEmail | 409 |
//! | Subscription(UpgradeNotAvailable) | 409 |
//! | Subscription(InvalidUpgradeTarget) | 400 |
//! | Subscription(AlreadyOnBasic) | 409 |
//! | Streak(InvalidRestDays) | 400 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

use super::{Email, Plan, Username};

/// Rejected subscription transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    #[error("upgrade not available: must be on Basic plan")]
    UpgradeNotAvailable,

    #[error("can only upgrade to Premium plan, got {0}")]
    InvalidUpgradeTarget(Plan),

    #[error("already on Basic plan")]
    AlreadyOnBasic,
}

impl SubscriptionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::UpgradeNotAvailable => ErrorCode::UpgradeNotAvailable,
            SubscriptionError::InvalidUpgradeTarget(_) => ErrorCode::InvalidUpgradeTarget,
            SubscriptionError::AlreadyOnBasic => ErrorCode::AlreadyOnBasic,
        }
    }
}

/// Rejected streak configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StreakError {
    #[error("rest days must be between {min}-{max}, got {0}", min = super::RestDays::MIN, max = super::RestDays::MAX)]
    InvalidRestDays(i32),
}

impl StreakError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StreakError::InvalidRestDays(_) => ErrorCode::InvalidRestDays,
        }
    }
}

impl From<SubscriptionError> for DomainError {
    fn from(err: SubscriptionError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

impl From<StreakError> for DomainError {
    fn from(err: StreakError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Errors surfaced by the user application handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum UserError {
    /// No user stored under this id.
    NotFound(UserId),

    /// Another account already holds this username.
    DuplicateUsername(Username),

    /// Another account already holds this email.
    DuplicateEmail(Email),

    /// The subscription engine rejected the transition.
    Subscription(SubscriptionError),

    /// The streak engine rejected the configuration.
    Streak(StreakError),

    /// Request input failed validation.
    ValidationFailed { field: String, message: String },

    /// Persistence or other infrastructure failure.
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(user_id: UserId) -> Self {
        UserError::NotFound(user_id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::DuplicateUsername(_) => ErrorCode::DuplicateUsername,
            UserError::DuplicateEmail(_) => ErrorCode::DuplicateEmail,
            UserError::Subscription(e) => e.code(),
            UserError::Streak(e) => e.code(),
            UserError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(user_id) => format!("User not found: {}", user_id),
            UserError::DuplicateUsername(username) => {
                format!("Username already taken: {}", username)
            }
            UserError::DuplicateEmail(email) => format!("Email already registered: {}", email),
            UserError::Subscription(SubscriptionError::UpgradeNotAvailable) => {
                "Already subscribed to Premium".to_string()
            }
            UserError::Subscription(SubscriptionError::AlreadyOnBasic) => {
                "Nothing to cancel: already on the Basic plan".to_string()
            }
            UserError::Subscription(e) => e.to_string(),
            UserError::Streak(e) => e.to_string(),
            UserError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Only infrastructure failures are worth retrying; engine rejections are final.
    pub fn is_retryable(&self) -> bool {
        matches!(self, UserError::Infrastructure(_))
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<SubscriptionError> for UserError {
    fn from(err: SubscriptionError) -> Self {
        UserError::Subscription(err)
    }
}

impl From<StreakError> for UserError {
    fn from(err: StreakError) -> Self {
        UserError::Streak(err)
    }
}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        UserError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => UserError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}

impl From<UserError> for DomainError {
    fn from(err: UserError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
