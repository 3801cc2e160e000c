//! CreateAccountHandler - Command handler for registering a new user.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::UserId;
use crate::domain::user::{StreakPolicy, User, UserError};
use crate::ports::{Clock, UserRepository};

#[derive(Debug, Clone)]
pub struct CreateAccountCommand {
    pub username: String,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct CreateAccountResult {
    pub user: User,
}

/// Registers a user on the Basic plan with a fresh streak.
///
/// Username and email must both be unused. The check runs before the write
/// and is not atomic with it, so the store must also enforce uniqueness if
/// registrations can race.
pub struct CreateAccountHandler {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
    policy: StreakPolicy,
}

impl CreateAccountHandler {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        policy: StreakPolicy,
    ) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    pub async fn handle(&self, cmd: CreateAccountCommand) -> Result<CreateAccountResult, UserError> {
        let user = User::register(
            UserId::new(),
            cmd.username,
            cmd.full_name,
            cmd.email,
            self.clock.now(),
            &self.policy,
        )?;

        if self.repository.find_by_username(&user.username).await?.is_some() {
            warn!(username = %user.username, "Registration rejected: username taken");
            return Err(UserError::DuplicateUsername(user.username));
        }
        if self.repository.find_by_email(&user.email).await?.is_some() {
            warn!(username = %user.username, "Registration rejected: email taken");
            return Err(UserError::DuplicateEmail(user.email));
        }

        self.repository.put(&user.id, &user).await?;

        info!(user_id = %user.id, username = %user.username, "Account created");

        Ok(CreateAccountResult { user })
    }
}
