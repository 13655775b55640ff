//! Catalog records as stored.

use rust_decimal::Decimal;

use teefinder_core::{CategoryId, ImageId, PlatformId, ProductId};

/// A product row with the id of its image, if the image still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub product_id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub rate: Decimal,
    pub image_id: Option<ImageId>,
}

/// A listing row. `price` is the stored text and is parsed on read, so one
/// corrupt row can be skipped without failing its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub product_id: ProductId,
    pub platform_id: PlatformId,
    pub platform_name: String,
    pub price: String,
    pub product_link: String,
    pub image_id: Option<ImageId>,
}

/// An image blob ready to be served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub image_id: ImageId,
    pub content_type: String,
    pub data: Vec<u8>,
}
