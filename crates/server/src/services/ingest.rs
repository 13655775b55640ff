//! Catalog Ingestion Service.
//!
//! A draft is validated in full before the store is touched, then written as
//! one atomic unit. Nothing is stored when any rule fails.

use tracing::instrument;

use teefinder_core::{ProductDraft, ProductId};

use super::CatalogError;
use crate::db::{CatalogStore, RepositoryError};

/// Catalog Ingestion Service.
pub struct IngestService<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> IngestService<'a> {
    /// Create a new ingestion service.
    #[must_use]
    pub const fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    /// Create a product with its listings and images.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for the first broken rule.
    /// Returns `CatalogError::CategoryNotFound` if the category does not exist,
    /// including when it disappears between the check and the insert.
    /// Returns `CatalogError::Repository` if the store fails; nothing is kept.
    #[instrument(skip_all, fields(name = %draft.name, platforms = draft.platforms.len()))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<ProductId, CatalogError> {
        let submission = draft.validate()?;
        let category_id = submission.category_id;

        if !self.store.category_exists(category_id).await? {
            return Err(CatalogError::CategoryNotFound(category_id));
        }

        let product_id = self
            .store
            .insert_product(&submission)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CatalogError::CategoryNotFound(category_id),
                other => CatalogError::Repository(other),
            })?;

        tracing::info!(
            %product_id,
            %category_id,
            listings = submission.platforms.len(),
            "Product created"
        );
        Ok(product_id)
    }

    /// Delete a product with its listings and images.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if the product does not exist.
    /// Returns `CatalogError::Repository` if the store fails.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: ProductId) -> Result<(), CatalogError> {
        self.store
            .delete_product(product_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CatalogError::ProductNotFound(product_id),
                other => CatalogError::Repository(other),
            })?;

        tracing::info!(%product_id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use teefinder_core::{CategoryId, CategoryType, ImageUpload, PlatformDraft, ValidationError};

    use super::*;
    use crate::db::MemoryStore;

    fn jpeg(name: &str) -> ImageUpload {
        ImageUpload::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn draft(category_id: CategoryId) -> ProductDraft {
        ProductDraft::new(category_id, "Oversized Tee", "599")
            .with_image(jpeg("tee.jpg"))
            .with_platform(PlatformDraft::new("Amazon", "https://a.example/t", "299"))
            .with_platform(
                PlatformDraft::new("Myntra", "https://m.example/t", "Out of stock")
                    .with_image(jpeg("myntra.jpg")),
            )
    }

    #[tokio::test]
    async fn test_create_product_stores_everything() {
        let store = MemoryStore::new();
        let category = store
            .create_category("Tees", CategoryType::Womens)
            .await
            .unwrap();

        let id = IngestService::new(&store)
            .create_product(draft(category.category_id))
            .await
            .unwrap();

        let listings = store.listings_for_product(id).await.unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[1].price, "OUT_OF_STOCK");
        assert!(listings[1].image_id.is_some());
    }

    #[tokio::test]
    async fn test_unknown_category_is_not_found() {
        let store = MemoryStore::new();
        let err = IngestService::new(&store)
            .create_product(draft(CategoryId::new(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CategoryNotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_listing_writes_nothing() {
        let store = MemoryStore::new();
        let category = store
            .create_category("Tees", CategoryType::Mens)
            .await
            .unwrap();
        let bad = draft(category.category_id)
            .with_platform(PlatformDraft::new("", "https://x.example", "10"));

        let err = IngestService::new(&store).create_product(bad).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::MissingPlatformField { position: 2, field: "name" })
        ));
        assert!(
            store
                .products_in_category(category.category_id, None)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_product_is_not_found() {
        let store = MemoryStore::new();
        let err = IngestService::new(&store)
            .delete_product(ProductId::new(3))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ProductNotFound(_)));
    }
}
