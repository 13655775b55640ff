//! Catalog persistence.
//!
//! # Database: `teefinder`
//!
//! ## Tables
//!
//! - `catalog.category` - Gender-scoped product groupings
//! - `catalog.product` - Products with their base rate
//! - `catalog.platform_listing` - Per-platform price and link, ordered by `position`
//! - `catalog.image_asset` - Image blobs owned by exactly one product or listing
//! - `admin.admin_user` - Admin login credentials (Argon2 hashes)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p teefinder-cli -- migrate
//! ```
//!
//! Handlers never see a concrete store. They work against the
//! [`CatalogStore`] and [`AdminStore`] traits so the same services run over
//! [`PgStore`] in production and [`MemoryStore`] in tests.

pub mod memory;
pub mod postgres;
mod store;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{AdminStore, CatalogStore};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate admin user).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
