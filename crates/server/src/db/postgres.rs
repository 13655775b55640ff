//! `PostgreSQL` implementation of the catalog and admin stores.
//!
//! Queries use runtime-checked `sqlx::query_as` with `FromRow` rows, mapped
//! into domain records with `TryFrom` so corrupt rows surface as
//! `RepositoryError::DataCorruption`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use teefinder_core::submission::{ImageData, ProductSubmission};
use teefinder_core::{
    AdminUserId, Category, CategoryId, CategoryType, ImageId, PlatformId, ProductId,
};

use super::{AdminStore, CatalogStore, RepositoryError};
use crate::models::{AdminCredentials, ListingRecord, ProductRecord, StoredImage};

/// Catalog and admin storage backed by a `PgPool`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(FromRow)]
struct CategoryRow {
    category_id: CategoryId,
    category_name: String,
    category_type: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RepositoryError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        let category_type = row.category_type.parse::<CategoryType>().map_err(|e| {
            RepositoryError::DataCorruption(format!(
                "category {}: {e}",
                row.category_id
            ))
        })?;
        Ok(Self {
            category_id: row.category_id,
            category_name: row.category_name,
            category_type,
        })
    }
}

#[derive(FromRow)]
struct ProductRow {
    product_id: ProductId,
    category_id: CategoryId,
    name: String,
    description: String,
    rate: Decimal,
    image_id: Option<ImageId>,
}

impl From<ProductRow> for ProductRecord {
    fn from(row: ProductRow) -> Self {
        Self {
            product_id: row.product_id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            rate: row.rate,
            image_id: row.image_id,
        }
    }
}

#[derive(FromRow)]
struct ListingRow {
    product_id: ProductId,
    platform_id: PlatformId,
    platform_name: String,
    price: String,
    product_link: String,
    image_id: Option<ImageId>,
}

impl From<ListingRow> for ListingRecord {
    fn from(row: ListingRow) -> Self {
        Self {
            product_id: row.product_id,
            platform_id: row.platform_id,
            platform_name: row.platform_name,
            price: row.price,
            product_link: row.product_link,
            image_id: row.image_id,
        }
    }
}

#[derive(FromRow)]
struct ImageRow {
    image_id: ImageId,
    content_type: String,
    data: Vec<u8>,
}

#[derive(FromRow)]
struct AdminRow {
    id: AdminUserId,
    adminuser: String,
    password_hash: String,
}

/// Escape `ILIKE` wildcards so the filter matches literally.
fn like_pattern(filter: &str) -> String {
    let mut escaped = String::with_capacity(filter.len() + 2);
    escaped.push('%');
    for c in filter.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn map_insert_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::NotFound;
    }
    RepositoryError::Database(e)
}

enum ImageOwner {
    Product(ProductId),
    Listing(PlatformId),
}

async fn insert_image(
    tx: &mut Transaction<'_, Postgres>,
    owner: ImageOwner,
    image: &ImageData,
) -> Result<ImageId, RepositoryError> {
    let (product_id, platform_id) = match owner {
        ImageOwner::Product(id) => (Some(id), None),
        ImageOwner::Listing(id) => (None, Some(id)),
    };
    let image_id = sqlx::query_scalar::<_, ImageId>(
        r"
        INSERT INTO catalog.image_asset (product_id, platform_id, content_type, data)
        VALUES ($1, $2, $3, $4)
        RETURNING image_id
        ",
    )
    .bind(product_id)
    .bind(platform_id)
    .bind(&image.content_type)
    .bind(&image.bytes)
    .fetch_one(&mut **tx)
    .await?;
    Ok(image_id)
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn categories_by_type(
        &self,
        category_type: CategoryType,
    ) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r"
            SELECT category_id, category_name, category_type
            FROM catalog.category
            WHERE category_type = $1
            ORDER BY category_id
            ",
        )
        .bind(category_type.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Category::try_from).collect()
    }

    async fn category_exists(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM catalog.category WHERE category_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn create_category(
        &self,
        name: &str,
        category_type: CategoryType,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO catalog.category (category_name, category_type)
            VALUES ($1, $2)
            RETURNING category_id, category_name, category_type
            ",
        )
        .bind(name)
        .bind(category_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn products_in_category(
        &self,
        id: CategoryId,
        name_filter: Option<&str>,
    ) -> Result<Vec<ProductRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT p.product_id, p.category_id, p.name, p.description, p.rate,
                   i.image_id
            FROM catalog.product p
            LEFT JOIN catalog.image_asset i ON i.product_id = p.product_id
            WHERE p.category_id = $1
              AND ($2::text IS NULL OR p.name ILIKE $2)
            ORDER BY p.product_id
            ",
        )
        .bind(id)
        .bind(name_filter.map(like_pattern))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    async fn listings_for_products(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<ListingRecord>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = ids.iter().map(ProductId::as_i32).collect();

        let rows = sqlx::query_as::<_, ListingRow>(
            r"
            SELECT l.product_id, l.platform_id, l.platform_name, l.price,
                   l.product_link, i.image_id
            FROM catalog.platform_listing l
            LEFT JOIN catalog.image_asset i ON i.platform_id = l.platform_id
            WHERE l.product_id = ANY($1)
            ORDER BY l.product_id, l.position
            ",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ListingRecord::from).collect())
    }

    async fn insert_product(
        &self,
        submission: &ProductSubmission,
    ) -> Result<ProductId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let product_id = sqlx::query_scalar::<_, ProductId>(
            r"
            INSERT INTO catalog.product (category_id, name, description, rate)
            VALUES ($1, $2, $3, $4)
            RETURNING product_id
            ",
        )
        .bind(submission.category_id)
        .bind(&submission.name)
        .bind(&submission.description)
        .bind(submission.rate)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        insert_image(&mut tx, ImageOwner::Product(product_id), &submission.image).await?;

        for (position, platform) in submission.platforms.iter().enumerate() {
            let position = i32::try_from(position).map_err(|_| {
                RepositoryError::Conflict(format!("listing position {position} out of range"))
            })?;
            let platform_id = sqlx::query_scalar::<_, PlatformId>(
                r"
                INSERT INTO catalog.platform_listing
                    (product_id, position, platform_name, price, product_link)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING platform_id
                ",
            )
            .bind(product_id)
            .bind(position)
            .bind(&platform.name)
            .bind(platform.price.to_string())
            .bind(&platform.link)
            .fetch_one(&mut *tx)
            .await?;

            if let Some(image) = &platform.image {
                insert_image(&mut tx, ImageOwner::Listing(platform_id), image).await?;
            }
        }

        // Dropping `tx` on any early return above rolls everything back.
        tx.commit().await?;
        Ok(product_id)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        // Listings and images go with the product via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM catalog.product WHERE product_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn image(&self, id: ImageId) -> Result<Option<StoredImage>, RepositoryError> {
        let row = sqlx::query_as::<_, ImageRow>(
            "SELECT image_id, content_type, data FROM catalog.image_asset WHERE image_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| StoredImage {
            image_id: r.image_id,
            content_type: r.content_type,
            data: r.data,
        }))
    }
}

#[async_trait]
impl AdminStore for PgStore {
    async fn credentials(
        &self,
        adminuser: &str,
    ) -> Result<Option<AdminCredentials>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT id, adminuser, password_hash FROM admin.admin_user WHERE adminuser = $1",
        )
        .bind(adminuser)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| AdminCredentials {
            id: r.id,
            adminuser: r.adminuser,
            password_hash: r.password_hash,
        }))
    }

    async fn create_admin(
        &self,
        adminuser: &str,
        password_hash: &str,
    ) -> Result<AdminUserId, RepositoryError> {
        sqlx::query_scalar::<_, AdminUserId>(
            r"
            INSERT INTO admin.admin_user (adminuser, password_hash)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(adminuser)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("adminuser already exists".to_owned());
            }
            RepositoryError::Database(e)
        })
    }
}
