//! In-process store for tests and local development.
//!
//! All state sits behind one `RwLock`, so every write is atomic with respect
//! to readers: a product and its listings appear and disappear together.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use teefinder_core::submission::{ImageData, ProductSubmission};
use teefinder_core::{
    AdminUserId, Category, CategoryId, CategoryType, ImageId, PlatformId, ProductId,
};

use super::{AdminStore, CatalogStore, RepositoryError};
use crate::models::{AdminCredentials, ListingRecord, ProductRecord, StoredImage};

/// Catalog and admin storage held in memory.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct Sequences {
    category: i32,
    product: i32,
    platform: i32,
    image: i32,
    admin: i32,
}

fn next(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Owner {
    Product(ProductId),
    Listing(PlatformId),
}

#[derive(Default)]
struct State {
    seq: Sequences,
    categories: Vec<Category>,
    products: Vec<ProductRecord>,
    // Insertion order is position order within a product.
    listings: Vec<ListingRecord>,
    images: BTreeMap<ImageId, (Owner, StoredImage)>,
    admins: Vec<AdminCredentials>,
}

impl State {
    fn add_image(&mut self, owner: Owner, image: &ImageData) -> ImageId {
        let image_id = ImageId::new(next(&mut self.seq.image));
        self.images.insert(
            image_id,
            (
                owner,
                StoredImage {
                    image_id,
                    content_type: image.content_type.clone(),
                    data: image.bytes.clone(),
                },
            ),
        );
        image_id
    }
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn categories_by_type(
        &self,
        category_type: CategoryType,
    ) -> Result<Vec<Category>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .categories
            .iter()
            .filter(|c| c.category_type == category_type)
            .cloned()
            .collect())
    }

    async fn category_exists(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.categories.iter().any(|c| c.category_id == id))
    }

    async fn create_category(
        &self,
        name: &str,
        category_type: CategoryType,
    ) -> Result<Category, RepositoryError> {
        let mut state = self.state.write().await;
        let category = Category {
            category_id: CategoryId::new(next(&mut state.seq.category)),
            category_name: name.to_owned(),
            category_type,
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn products_in_category(
        &self,
        id: CategoryId,
        name_filter: Option<&str>,
    ) -> Result<Vec<ProductRecord>, RepositoryError> {
        let needle = name_filter.map(str::to_lowercase);
        let state = self.state.read().await;
        Ok(state
            .products
            .iter()
            .filter(|p| p.category_id == id)
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|n| p.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect())
    }

    async fn listings_for_products(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<ListingRecord>, RepositoryError> {
        let state = self.state.read().await;
        // Ids are issued in order and a product's listings are pushed
        // together, so insertion order is already (product, position).
        Ok(state
            .listings
            .iter()
            .filter(|listing| ids.contains(&listing.product_id))
            .cloned()
            .collect())
    }

    async fn insert_product(
        &self,
        submission: &ProductSubmission,
    ) -> Result<ProductId, RepositoryError> {
        let mut state = self.state.write().await;

        if !state
            .categories
            .iter()
            .any(|c| c.category_id == submission.category_id)
        {
            return Err(RepositoryError::NotFound);
        }

        let product_id = ProductId::new(next(&mut state.seq.product));
        let image_id = state.add_image(Owner::Product(product_id), &submission.image);
        state.products.push(ProductRecord {
            product_id,
            category_id: submission.category_id,
            name: submission.name.clone(),
            description: submission.description.clone(),
            rate: submission.rate,
            image_id: Some(image_id),
        });

        for platform in &submission.platforms {
            let platform_id = PlatformId::new(next(&mut state.seq.platform));
            let image_id = platform
                .image
                .as_ref()
                .map(|image| state.add_image(Owner::Listing(platform_id), image));
            state.listings.push(ListingRecord {
                product_id,
                platform_id,
                platform_name: platform.name.clone(),
                price: platform.price.to_string(),
                product_link: platform.link.clone(),
                image_id,
            });
        }

        Ok(product_id)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;

        let before = state.products.len();
        state.products.retain(|p| p.product_id != id);
        if state.products.len() == before {
            return Err(RepositoryError::NotFound);
        }

        let removed: Vec<PlatformId> = state
            .listings
            .iter()
            .filter(|l| l.product_id == id)
            .map(|l| l.platform_id)
            .collect();
        state.listings.retain(|l| l.product_id != id);
        state.images.retain(|_, (owner, _)| match owner {
            Owner::Product(p) => *p != id,
            Owner::Listing(l) => !removed.contains(l),
        });
        Ok(())
    }

    async fn image(&self, id: ImageId) -> Result<Option<StoredImage>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.images.get(&id).map(|(_, image)| image.clone()))
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn credentials(
        &self,
        adminuser: &str,
    ) -> Result<Option<AdminCredentials>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state
            .admins
            .iter()
            .find(|a| a.adminuser == adminuser)
            .cloned())
    }

    async fn create_admin(
        &self,
        adminuser: &str,
        password_hash: &str,
    ) -> Result<AdminUserId, RepositoryError> {
        let mut state = self.state.write().await;
        if state.admins.iter().any(|a| a.adminuser == adminuser) {
            return Err(RepositoryError::Conflict(
                "adminuser already exists".to_owned(),
            ));
        }
        let id = AdminUserId::new(next(&mut state.seq.admin));
        state.admins.push(AdminCredentials {
            id,
            adminuser: adminuser.to_owned(),
            password_hash: password_hash.to_owned(),
        });
        Ok(id)
    }
}
