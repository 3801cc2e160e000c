//! User repository port.
//!
//! Defines the contract for loading and storing User aggregate snapshots.
//!
//! # Concurrency
//!
//! The domain engines read the whole snapshot, compute a new one and hand it
//! back. They have no compare-and-swap of their own, so implementations (or
//! the service wrapping them) must allow at most one in-flight mutation per
//! user, for example with a row lock, a version check or a per-user actor.
//! Without that, two concurrent payments against the same loaded snapshot
//! silently lose one update.
//!
//! # Example
//!
//! ```ignore
//! async fn cancel(repo: &dyn UserRepository, user_id: &UserId, now: Timestamp) -> Result<(), UserError> {
//!     let user = repo.get(user_id).await?.ok_or_else(|| UserError::not_found(*user_id))?;
//!     let subscription = user.subscription.cancel(now)?;
//!     repo.put(user_id, &user.with_subscription(subscription, now)).await?;
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::user::{Email, User, Username};

/// Repository port for User aggregate persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load a snapshot.
    ///
    /// Returns `None` if no user is stored under `user_id`.
    async fn get(&self, user_id: &UserId) -> Result<Option<User>, DomainError>;

    /// Look up the account holding `username`.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError>;

    /// Look up the account holding `email`. Matching is exact on the stored value.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Store a snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn put(&self, user_id: &UserId, user: &User) -> Result<(), DomainError>;

    /// Remove a user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if nothing is stored under `user_id`
    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// Users whose subscription expiry is at or before `cutoff`.
    ///
    /// Used by the scheduled expiry sweep.
    async fn find_expiring_by(&self, cutoff: Timestamp) -> Result<Vec<User>, DomainError>;
}
