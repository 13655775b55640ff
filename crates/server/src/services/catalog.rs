//! Catalog Query Service.
//!
//! Read-only: gender-filtered category listing and the
//! category → product → listing tree. The listings of a whole category are
//! read in one query. A broken leaf (a listing row whose price does not
//! parse) is logged and skipped; it never fails the whole tree.

use std::collections::HashMap;

use tracing::instrument;

use teefinder_core::{
    Category, CategoryId, CategoryType, ImageId, PlatformListing, Price, Product, ProductId,
    ValidationError,
};

use super::CatalogError;
use crate::db::CatalogStore;
use crate::models::{ListingRecord, ProductRecord};

/// Builds the URI under which an image is served.
#[derive(Debug, Clone, Default)]
pub struct ImageLinks {
    base: Option<String>,
}

impl ImageLinks {
    /// Relative `/images/{id}` URIs, or absolute ones under `public_base_url`.
    #[must_use]
    pub fn new(public_base_url: Option<&str>) -> Self {
        Self {
            base: public_base_url
                .map(|b| b.trim().trim_end_matches('/').to_owned())
                .filter(|b| !b.is_empty()),
        }
    }

    /// URI for one image.
    #[must_use]
    pub fn uri(&self, id: ImageId) -> String {
        match &self.base {
            Some(base) => format!("{base}/images/{id}"),
            None => format!("/images/{id}"),
        }
    }
}

/// Catalog Query Service.
pub struct CatalogService<'a> {
    store: &'a dyn CatalogStore,
    links: &'a ImageLinks,
}

impl<'a> CatalogService<'a> {
    /// Create a new query service.
    #[must_use]
    pub const fn new(store: &'a dyn CatalogStore, links: &'a ImageLinks) -> Self {
        Self { store, links }
    }

    /// Categories of one gender.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if the filter is absent or not
    /// `mens`/`womens`. Returns `CatalogError::Repository` if the store fails.
    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        category_type: Option<&str>,
    ) -> Result<Vec<Category>, CatalogError> {
        let category_type = category_type
            .filter(|s| !s.trim().is_empty())
            .ok_or(ValidationError::MissingField("category_type"))?
            .parse::<CategoryType>()
            .map_err(ValidationError::from)?;

        Ok(self.store.categories_by_type(category_type).await?)
    }

    /// Products of a category with their listings in submission order.
    ///
    /// `search` narrows the result to names containing it, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if the id is absent or malformed.
    /// Returns `CatalogError::CategoryNotFound` if the category does not exist.
    /// Returns `CatalogError::Repository` if the product or listing query
    /// fails.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        category_id: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<Product>, CatalogError> {
        let raw = category_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingField("category_id"))?;
        let category_id = raw
            .parse::<CategoryId>()
            .map_err(|_| ValidationError::InvalidCategoryId(raw.to_owned()))?;

        if !self.store.category_exists(category_id).await? {
            return Err(CatalogError::CategoryNotFound(category_id));
        }

        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let records = self.store.products_in_category(category_id, search).await?;

        let ids: Vec<ProductId> = records.iter().map(|r| r.product_id).collect();
        let mut listings: HashMap<ProductId, Vec<PlatformListing>> = HashMap::new();
        for row in self.store.listings_for_products(&ids).await? {
            let product_id = row.product_id;
            if let Some(listing) = self.listing(row) {
                listings.entry(product_id).or_default().push(listing);
            }
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let platforms = listings.remove(&record.product_id).unwrap_or_default();
                self.assemble(record, platforms)
            })
            .collect())
    }

    fn assemble(&self, record: ProductRecord, platforms: Vec<PlatformListing>) -> Product {
        Product {
            product_id: record.product_id,
            category_id: record.category_id,
            name: record.name,
            description: record.description,
            rate: record.rate,
            image: record.image_id.map(|id| self.links.uri(id)),
            platforms,
        }
    }

    fn listing(&self, row: ListingRecord) -> Option<PlatformListing> {
        match Price::parse(&row.price) {
            Ok(price) => Some(PlatformListing {
                platform_id: row.platform_id,
                platform_name: row.platform_name,
                price,
                product_link: row.product_link,
                image: row.image_id.map(|id| self.links.uri(id)),
            }),
            Err(e) => {
                tracing::warn!(
                    product_id = %row.product_id,
                    platform_id = %row.platform_id,
                    price = %row.price,
                    error = %e,
                    "Skipping listing with malformed price"
                );
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use teefinder_core::submission::{ImageData, PlatformSubmission, ProductSubmission};
    use teefinder_core::PlatformId;

    use super::*;
    use crate::db::{MemoryStore, RepositoryError};
    use crate::models::StoredImage;

    fn image() -> ImageData {
        ImageData {
            content_type: "image/jpeg".to_owned(),
            file_name: None,
            bytes: vec![0xFF, 0xD8],
        }
    }

    fn listing(name: &str, price: Price) -> PlatformSubmission {
        PlatformSubmission {
            name: name.to_owned(),
            link: format!("https://{}.example/p/1", name.to_lowercase()),
            price,
            image: None,
        }
    }

    async fn seeded() -> (MemoryStore, CategoryId) {
        let store = MemoryStore::new();
        let category = store
            .create_category("T-Shirts", CategoryType::Mens)
            .await
            .unwrap();
        store
            .insert_product(&ProductSubmission {
                name: "Graphic Tee".to_owned(),
                description: "Cotton".to_owned(),
                rate: Decimal::new(499, 0),
                category_id: category.category_id,
                image: image(),
                platforms: vec![
                    listing("Amazon", Price::parse("299").unwrap()),
                    listing("Flipkart", Price::OutOfStock),
                ],
            })
            .await
            .unwrap();
        (store, category.category_id)
    }

    #[test]
    fn test_image_links() {
        assert_eq!(ImageLinks::new(None).uri(ImageId::new(7)), "/images/7");
        assert_eq!(
            ImageLinks::new(Some("https://cdn.example/")).uri(ImageId::new(7)),
            "https://cdn.example/images/7"
        );
        assert_eq!(ImageLinks::new(Some("  ")).uri(ImageId::new(7)), "/images/7");
    }

    #[tokio::test]
    async fn test_list_categories_requires_valid_filter() {
        let store = MemoryStore::new();
        let links = ImageLinks::default();
        let service = CatalogService::new(&store, &links);

        let missing = service.list_categories(None).await.unwrap_err();
        assert!(matches!(
            missing,
            CatalogError::Validation(ValidationError::MissingField("category_type"))
        ));

        let bad = service.list_categories(Some("kids")).await.unwrap_err();
        assert!(matches!(
            bad,
            CatalogError::Validation(ValidationError::InvalidCategoryType(_))
        ));

        assert!(service.list_categories(Some("womens")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_products_builds_tree_in_order() {
        let (store, category_id) = seeded().await;
        let links = ImageLinks::default();
        let id = category_id.to_string();

        let products = CatalogService::new(&store, &links)
            .list_products(Some(&id), None)
            .await
            .unwrap();

        assert_eq!(products.len(), 1);
        let product = &products[0];
        assert_eq!(product.image.as_deref(), Some("/images/1"));
        let names: Vec<_> = product.platforms.iter().map(|p| p.platform_name.as_str()).collect();
        assert_eq!(names, ["Amazon", "Flipkart"]);
        assert_eq!(product.platforms[1].price, Price::OutOfStock);
    }

    #[tokio::test]
    async fn test_list_products_unknown_category_is_not_found() {
        let store = MemoryStore::new();
        let links = ImageLinks::default();
        let err = CatalogService::new(&store, &links)
            .list_products(Some("99"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CategoryNotFound(id) if id == CategoryId::new(99)));
    }

    #[tokio::test]
    async fn test_list_products_rejects_malformed_id() {
        let store = MemoryStore::new();
        let links = ImageLinks::default();
        let err = CatalogService::new(&store, &links)
            .list_products(Some("abc"), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::InvalidCategoryId(_))
        ));
    }

    #[tokio::test]
    async fn test_search_filter() {
        let (store, category_id) = seeded().await;
        let links = ImageLinks::default();
        let service = CatalogService::new(&store, &links);
        let id = category_id.to_string();

        assert_eq!(service.list_products(Some(&id), Some("graphic")).await.unwrap().len(), 1);
        assert!(service.list_products(Some(&id), Some("hoodie")).await.unwrap().is_empty());
        assert_eq!(service.list_products(Some(&id), Some("  ")).await.unwrap().len(), 1);
    }

    /// Wraps a store and corrupts or fails the listing reads.
    struct BrokenListings {
        inner: MemoryStore,
        fail: bool,
    }

    #[async_trait]
    impl CatalogStore for BrokenListings {
        async fn ping(&self) -> Result<(), RepositoryError> {
            self.inner.ping().await
        }
        async fn categories_by_type(
            &self,
            category_type: CategoryType,
        ) -> Result<Vec<Category>, RepositoryError> {
            self.inner.categories_by_type(category_type).await
        }
        async fn category_exists(&self, id: CategoryId) -> Result<bool, RepositoryError> {
            self.inner.category_exists(id).await
        }
        async fn create_category(
            &self,
            name: &str,
            category_type: CategoryType,
        ) -> Result<Category, RepositoryError> {
            self.inner.create_category(name, category_type).await
        }
        async fn products_in_category(
            &self,
            id: CategoryId,
            name_filter: Option<&str>,
        ) -> Result<Vec<ProductRecord>, RepositoryError> {
            self.inner.products_in_category(id, name_filter).await
        }
        async fn listings_for_products(
            &self,
            ids: &[ProductId],
        ) -> Result<Vec<ListingRecord>, RepositoryError> {
            if self.fail {
                return Err(RepositoryError::DataCorruption("boom".to_owned()));
            }
            let mut rows = self.inner.listings_for_products(ids).await?;
            rows.insert(1, ListingRecord {
                product_id: *ids.first().unwrap(),
                platform_id: PlatformId::new(999),
                platform_name: "Broken".to_owned(),
                price: "cheap".to_owned(),
                product_link: "https://broken.example".to_owned(),
                image_id: None,
            });
            Ok(rows)
        }
        async fn insert_product(
            &self,
            submission: &ProductSubmission,
        ) -> Result<ProductId, RepositoryError> {
            self.inner.insert_product(submission).await
        }
        async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
            self.inner.delete_product(id).await
        }
        async fn image(&self, id: ImageId) -> Result<Option<StoredImage>, RepositoryError> {
            self.inner.image(id).await
        }
    }

    #[tokio::test]
    async fn test_malformed_listing_is_skipped() {
        let (inner, category_id) = seeded().await;
        let store = BrokenListings { inner, fail: false };
        let links = ImageLinks::default();
        let id = category_id.to_string();

        let products = CatalogService::new(&store, &links)
            .list_products(Some(&id), None)
            .await
            .unwrap();
        let names: Vec<_> = products[0]
            .platforms
            .iter()
            .map(|p| p.platform_name.as_str())
            .collect();
        assert_eq!(names, ["Amazon", "Flipkart"]);
    }

    #[tokio::test]
    async fn test_listing_query_failure_is_reported() {
        let (inner, category_id) = seeded().await;
        let store = BrokenListings { inner, fail: true };
        let links = ImageLinks::default();
        let id = category_id.to_string();

        let err = CatalogService::new(&store, &links)
            .list_products(Some(&id), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Repository(RepositoryError::DataCorruption(_))
        ));
    }

    #[tokio::test]
    async fn test_listings_stay_with_their_product() {
        let (store, category_id) = seeded().await;
        store
            .insert_product(&ProductSubmission {
                name: "Plain Polo".to_owned(),
                description: String::new(),
                rate: Decimal::new(350, 0),
                category_id,
                image: image(),
                platforms: vec![listing("Myntra", Price::parse("320").unwrap())],
            })
            .await
            .unwrap();
        let links = ImageLinks::default();
        let id = category_id.to_string();

        let products = CatalogService::new(&store, &links)
            .list_products(Some(&id), None)
            .await
            .unwrap();
        let shape: Vec<_> = products
            .iter()
            .map(|p| (p.name.as_str(), p.platforms.len()))
            .collect();
        assert_eq!(shape, [("Graphic Tee", 2), ("Plain Polo", 1)]);
        assert_eq!(products[1].platforms[0].platform_name, "Myntra");
    }
}
