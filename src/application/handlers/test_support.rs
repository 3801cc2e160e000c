//! Shared fixtures for handler tests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::adapters::{FixedClock, InMemoryUserRepository};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{
    BillingPeriod, BillingPolicy, Email, Plan, StreakPolicy, User, Username,
};
use crate::ports::UserRepository;

pub fn t0() -> Timestamp {
    Timestamp::from_unix_secs(1_700_000_000).unwrap()
}

pub fn basic_user() -> User {
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

pub fn premium_user(period: BillingPeriod) -> User {
    let user = basic_user();
    let sub = user
        .subscription
        .upgrade(Plan::Premium, period, t0(), &BillingPolicy::default())
        .unwrap();
    user.with_subscription(sub, t0())
}

pub fn repo_with(user: &User) -> Arc<InMemoryUserRepository> {
    Arc::new(InMemoryUserRepository::with_users([user.clone()]))
}

pub fn clock_at(now: Timestamp) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(now))
}

/// Repository whose writes always fail.
pub struct FailingPutRepository {
    pub inner: InMemoryUserRepository,
}

impl FailingPutRepository {
    pub fn with(user: &User) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryUserRepository::with_users([user.clone()]),
        })
    }
}

#[async_trait]
impl UserRepository for FailingPutRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<User>, DomainError> {
        self.inner.get(user_id).await
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError> {
        self.inner.find_by_username(username).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        self.inner.find_by_email(email).await
    }

    async fn put(&self, _user_id: &UserId, _user: &User) -> Result<(), DomainError> {
        Err(DomainError::new(ErrorCode::DatabaseError, "Simulated write failure"))
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.inner.delete(user_id).await
    }

    async fn find_expiring_by(&self, cutoff: Timestamp) -> Result<Vec<User>, DomainError> {
        self.inner.find_expiring_by(cutoff).await
    }
}
