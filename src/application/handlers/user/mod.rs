//! Account handlers.

mod create_account;
mod delete_account;

pub use create_account::{CreateAccountCommand, CreateAccountHandler, CreateAccountResult};
pub use delete_account::{DeleteAccountCommand, DeleteAccountHandler};
