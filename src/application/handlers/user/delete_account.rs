//! DeleteAccountHandler - Command handler for removing a user.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{ErrorCode, UserId};
use crate::domain::user::UserError;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct DeleteAccountCommand {
    pub user_id: UserId,
}

pub struct DeleteAccountHandler {
    repository: Arc<dyn UserRepository>,
}

impl DeleteAccountHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteAccountCommand) -> Result<(), UserError> {
        self.repository.delete(&cmd.user_id).await.map_err(|e| {
            if e.code == ErrorCode::UserNotFound {
                UserError::not_found(cmd.user_id)
            } else {
                e.into()
            }
        })?;

        info!(user_id = %cmd.user_id, "Account deleted");
        Ok(())
    }
}
