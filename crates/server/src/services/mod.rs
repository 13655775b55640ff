//! Business logic services.
//!
//! # Services
//!
//! - `catalog` - Category and product queries, image URI resolution
//! - `ingest` - Product creation and deletion
//! - `auth` - Admin password login
//!
//! Services borrow a store from `AppState` for the duration of one request.

pub mod auth;
pub mod catalog;
pub mod ingest;

use thiserror::Error;

use teefinder_core::{CategoryId, ProductId, ValidationError};

use crate::db::RepositoryError;

/// Errors from catalog queries and ingestion.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request broke a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced category does not exist.
    #[error("Category {0} not found.")]
    CategoryNotFound(CategoryId),

    /// The referenced product does not exist.
    #[error("Product {0} not found.")]
    ProductNotFound(ProductId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
