//! Read-side catalog tree: category → product → platform listings.
//!
//! These are the shapes the query endpoints return and the client renders.
//! Field names are part of the wire contract.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, CategoryType, PlatformId, Price, ProductId};

/// A gender-scoped grouping of products (e.g. "Hoodies" under `mens`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: CategoryId,
    pub category_name: String,
    pub category_type: CategoryType,
}

/// A product with its platform listings in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    /// Empty when none was supplied.
    pub description: String,
    /// Advertised base price, currency-agnostic.
    pub rate: Decimal,
    /// URI of the product image, `None` when the asset is missing.
    pub image: Option<String>,
    /// Listings in the order they were submitted; the first is the primary one.
    pub platforms: Vec<PlatformListing>,
}

/// One external retailer's offer for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformListing {
    pub platform_id: PlatformId,
    pub platform_name: String,
    pub price: Price,
    pub product_link: String,
    /// URI of the listing's own image, if one was uploaded.
    pub image: Option<String>,
}

/// Returned after a successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedProduct {
    pub product_id: ProductId,
}
