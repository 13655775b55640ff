//! Admin authentication service.
//!
//! Verifies an admin user's password against the stored Argon2 hash. A
//! successful login only reports success: no session or token is issued.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::instrument;

use teefinder_core::{AdminUserId, ValidationError};

use crate::db::{AdminStore, RepositoryError};

/// Admin authentication service.
pub struct AuthService<'a> {
    admins: &'a dyn AdminStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(admins: &'a dyn AdminStore) -> Self {
        Self { admins }
    }

    /// Check an admin's credentials.
    ///
    /// Both fields are trimmed before use.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if either field is blank.
    /// Returns `AuthError::InvalidCredentials` if the user is unknown or the
    /// password does not match.
    /// Returns `AuthError::Repository` if the lookup fails.
    #[instrument(skip(self, password))]
    pub async fn login(&self, adminuser: &str, password: &str) -> Result<AdminUserId, AuthError> {
        let adminuser = adminuser.trim();
        let password = password.trim();
        if adminuser.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let credentials = self
            .admins
            .credentials(adminuser)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &credentials.password_hash)?;

        tracing::info!(admin_id = %credentials.id, "Admin logged in");
        Ok(credentials.id)
    }

    /// Create an admin user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if either field is blank.
    /// Returns `AuthError::UserAlreadyExists` if the name is taken.
    pub async fn create_admin(
        &self,
        adminuser: &str,
        password: &str,
    ) -> Result<AdminUserId, AuthError> {
        let adminuser = adminuser.trim();
        let password = password.trim();
        if adminuser.is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let password_hash = hash_password(password)?;
        self.admins
            .create_admin(adminuser, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })
    }
}

/// Hash a password using Argon2.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    async fn store_with_admin() -> MemoryStore {
        let store = MemoryStore::new();
        AuthService::new(&store)
            .create_admin("admin", "secret")
            .await
            .unwrap();
        store
    }

    #[test]
    fn test_hash_password_round_trip() {
        let hash = hash_password("secret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_malformed_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("secret", "not-a-hash"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_accepts_correct_password() {
        let store = store_with_admin().await;
        let id = AuthService::new(&store).login("admin", "secret").await.unwrap();
        assert_eq!(id, AdminUserId::new(1));
    }

    #[tokio::test]
    async fn test_login_trims_input() {
        let store = store_with_admin().await;
        assert!(AuthService::new(&store).login("  admin ", " secret\n").await.is_ok());
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_unknown_user() {
        let store = store_with_admin().await;
        let auth = AuthService::new(&store);
        assert!(matches!(
            auth.login("admin", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody", "secret").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let store = store_with_admin().await;
        let err = AuthService::new(&store).login("admin", "   ").await.unwrap_err();
        assert_eq!(err.to_string(), "Username and password are required.");
    }

    #[tokio::test]
    async fn test_create_admin_twice_conflicts() {
        let store = store_with_admin().await;
        assert!(matches!(
            AuthService::new(&store).create_admin("admin", "other").await,
            Err(AuthError::UserAlreadyExists)
        ));
    }
}
