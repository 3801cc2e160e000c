//! Snapshot loading shared by the user handlers.

use crate::domain::foundation::UserId;
use crate::domain::user::{User, UserError};
use crate::ports::UserRepository;

/// Loads a user or fails with `NotFound`.
pub(crate) async fn load_user(
    repository: &dyn UserRepository,
    user_id: &UserId,
) -> Result<User, UserError> {
    repository
        .get(user_id)
        .await?
        .ok_or_else(|| UserError::not_found(*user_id))
}
