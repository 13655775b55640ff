//! Authentication error types.

use thiserror::Error;

use teefinder_core::ValidationError;

use crate::db::RepositoryError;

/// Errors that can occur during admin authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password missing after trimming.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unknown user or wrong password. The two are not distinguished.
    #[error("Invalid adminuser or password.")]
    InvalidCredentials,

    /// The admin user already exists.
    #[error("admin user already exists")]
    UserAlreadyExists,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
