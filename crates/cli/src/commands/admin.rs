//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! tf-cli admin create --adminuser admin --password 's3cret'
//! ```

use thiserror::Error;

use teefinder_core::AdminUserId;
use teefinder_server::db::PgStore;
use teefinder_server::services::auth::{AuthError, AuthService};

use super::{ConnectError, connect};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// User already exists.
    #[error("Admin user already exists: {0}")]
    UserExists(String),

    #[error(transparent)]
    Auth(AuthError),
}

/// Create a new admin user.
///
/// # Errors
///
/// Returns `AdminError::UserExists` if the name is taken, or `AdminError::Auth`
/// for blank input and storage failures.
pub async fn create_user(adminuser: &str, password: &str) -> Result<AdminUserId, AdminError> {
    let store = PgStore::new(connect().await?);

    tracing::info!("Creating admin user: {}", adminuser.trim());
    let id = AuthService::new(&store)
        .create_admin(adminuser, password)
        .await
        .map_err(|e| match e {
            AuthError::UserAlreadyExists => AdminError::UserExists(adminuser.trim().to_owned()),
            other => AdminError::Auth(other),
        })?;

    tracing::info!(admin_id = %id, "Admin user created");
    Ok(id)
}
