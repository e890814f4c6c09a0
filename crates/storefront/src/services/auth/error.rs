//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::middleware::SessionError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. The two are deliberately not
    /// distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration input rejected.
    #[error("invalid registration: {0}")]
    Validation(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Session could not be established or destroyed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
