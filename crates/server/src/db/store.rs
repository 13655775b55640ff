//! Storage seams used by the services.

use async_trait::async_trait;

use teefinder_core::submission::ProductSubmission;
use teefinder_core::{AdminUserId, Category, CategoryId, CategoryType, ImageId, ProductId};

use super::RepositoryError;
use crate::models::{AdminCredentials, ListingRecord, ProductRecord, StoredImage};

/// Catalog storage.
///
/// Implementations must make [`insert_product`](Self::insert_product) and
/// [`delete_product`](Self::delete_product) all-or-nothing: a reader never
/// observes a product without all of its listings and images.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check that the store can serve requests.
    async fn ping(&self) -> Result<(), RepositoryError>;

    /// Categories of one gender, oldest first.
    async fn categories_by_type(
        &self,
        category_type: CategoryType,
    ) -> Result<Vec<Category>, RepositoryError>;

    /// Whether a category with this id exists.
    async fn category_exists(&self, id: CategoryId) -> Result<bool, RepositoryError>;

    /// Create a category.
    async fn create_category(
        &self,
        name: &str,
        category_type: CategoryType,
    ) -> Result<Category, RepositoryError>;

    /// Products in a category, oldest first. `name_filter` is a
    /// case-insensitive substring match on the product name.
    async fn products_in_category(
        &self,
        id: CategoryId,
        name_filter: Option<&str>,
    ) -> Result<Vec<ProductRecord>, RepositoryError>;

    /// Listings of several products in one read, ordered by product id and
    /// then submission order.
    async fn listings_for_products(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<ListingRecord>, RepositoryError>;

    /// Listings of one product in submission order.
    async fn listings_for_product(
        &self,
        id: ProductId,
    ) -> Result<Vec<ListingRecord>, RepositoryError> {
        self.listings_for_products(&[id]).await
    }

    /// Store a validated product with its listings and images as one unit.
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist.
    async fn insert_product(
        &self,
        submission: &ProductSubmission,
    ) -> Result<ProductId, RepositoryError>;

    /// Remove a product with its listings and images as one unit.
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Fetch an image blob.
    async fn image(&self, id: ImageId) -> Result<Option<StoredImage>, RepositoryError>;
}

/// Admin credential storage.
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Look up stored credentials by login name.
    async fn credentials(
        &self,
        adminuser: &str,
    ) -> Result<Option<AdminCredentials>, RepositoryError>;

    /// Create an admin user with an already-hashed password.
    ///
    /// Returns `RepositoryError::Conflict` if the name is taken.
    async fn create_admin(
        &self,
        adminuser: &str,
        password_hash: &str,
    ) -> Result<AdminUserId, RepositoryError>;
}
