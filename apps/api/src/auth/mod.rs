// Accounts and sessions: credential hashing, the account record set over the
// key-value store, and the session state machine. All plan writes go through
// SessionManager — no other module mutates the stored plan field.

pub mod credential;
pub mod handlers;
pub mod session;
pub mod store;

use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("An account with this email already exists.")]
    DuplicateAccount,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
