//! CLI command implementations.

pub mod admin;
pub mod category;
pub mod migrate;

use sqlx::PgPool;
use thiserror::Error;

use teefinder_server::config::{ConfigError, ServerConfig};
use teefinder_server::db;

/// Errors opening the database.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// Environment is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Connect using the same environment variables as the server.
async fn connect() -> Result<PgPool, ConnectError> {
    let config = ServerConfig::from_env()?;
    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&config.database_url).await?)
}
