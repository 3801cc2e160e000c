//! In-memory user repository.
//!
//! Backs the handlers in tests and local runs. Each `put` replaces the whole
//! snapshot, so it has the same last-write-wins behaviour as a naive SQL
//! upsert.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::{Email, User, Username};
use crate::ports::UserRepository;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with existing users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == *username).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == *email).cloned())
    }

    async fn put(&self, user_id: &UserId, user: &User) -> Result<(), DomainError> {
        if user.id != *user_id {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("snapshot id {} does not match key {}", user.id, user_id),
            ));
        }
        self.users.write().await.insert(*user_id, user.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        match self.users.write().await.remove(user_id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("User not found: {}", user_id),
            )),
        }
    }

    async fn find_expiring_by(&self, cutoff: Timestamp) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let mut expiring: Vec<User> = users
            .values()
            .filter(|u| {
                u.subscription
                    .expires_at()
                    .is_some_and(|expires_at| !expires_at.is_after(&cutoff))
            })
            .cloned()
            .collect();
        expiring.sort_by_key(|u| u.subscription.expires_at());
        Ok(expiring)
    }
}
