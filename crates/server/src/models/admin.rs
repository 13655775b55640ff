//! Admin credential record.

use teefinder_core::AdminUserId;

/// Stored credentials for one admin user.
///
/// `Debug` is implemented manually to keep the hash out of logs.
#[derive(Clone)]
pub struct AdminCredentials {
    pub id: AdminUserId,
    pub adminuser: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("id", &self.id)
            .field("adminuser", &self.adminuser)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}
