//! Category management commands.
//!
//! Categories have no HTTP write surface; they are curated here.

use thiserror::Error;

use teefinder_core::{Category, CategoryType};
use teefinder_server::db::{CatalogStore, PgStore, RepositoryError};

use super::{ConnectError, connect};

/// Errors that can occur during category operations.
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Category name must not be empty")]
    EmptyName,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create a category.
///
/// # Errors
///
/// Returns `CategoryError::EmptyName` for a blank name, or a connection or
/// repository error.
pub async fn create(name: &str, category_type: CategoryType) -> Result<Category, CategoryError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryError::EmptyName);
    }

    let store = PgStore::new(connect().await?);
    let category = store.create_category(name, category_type).await?;

    tracing::info!(
        category_id = %category.category_id,
        category_type = %category.category_type,
        "Category created: {}",
        category.category_name
    );
    Ok(category)
}

/// Print the categories of one gender.
///
/// # Errors
///
/// Returns a connection or repository error.
pub async fn list(category_type: CategoryType) -> Result<(), CategoryError> {
    let store = PgStore::new(connect().await?);
    let categories = store.categories_by_type(category_type).await?;

    #[allow(clippy::print_stdout)]
    for category in &categories {
        println!("{}\t{}", category.category_id, category.category_name);
    }
    tracing::info!("{} {} categories", categories.len(), category_type);
    Ok(())
}
