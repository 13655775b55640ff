//! Product route handlers: listing, multipart ingestion, deletion.

use axum::{
    Json,
    extract::{
        Multipart, Path, Query, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::QueryRejection,
    },
    http::StatusCode,
};
use serde::Deserialize;

use teefinder_core::submission::{FieldName, ProductForm};
use teefinder_core::{ApiResponse, CreatedProduct, ImageUpload, Product, ProductId};

use crate::error::{AppError, Result};
use crate::services::catalog::CatalogService;
use crate::services::ingest::IngestService;
use crate::state::AppState;

/// Query parameters for `GET /products`.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category_id: Option<String>,
    /// Case-insensitive name filter.
    pub q: Option<String>,
}

/// List a category's products with their platform listings.
pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProductsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Product>>>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let products = CatalogService::new(state.catalog(), state.image_links())
        .list_products(query.category_id.as_deref(), query.q.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(products)))
}

fn multipart_error(err: &MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Create a product from a multipart submission.
///
/// Parts are routed by name: `name`, `description`, `rate`, `category_id`,
/// `image`, `platforms[<i>][name|link|price]` and `platform_image_<i>`.
/// Unknown parts are ignored; a malformed listing part name fails the whole
/// submission.
pub async fn create(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<CreatedProduct>>> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let mut form = ProductForm::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        let raw_name = field.name().unwrap_or_default();
        let Some(name) = FieldName::parse(raw_name) else {
            if form.push_unrecognised(raw_name) {
                tracing::debug!(field = raw_name, "Malformed listing field name");
            } else {
                tracing::debug!(field = raw_name, "Ignoring unknown multipart field");
            }
            continue;
        };

        if name.is_file() {
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(str::to_owned);
            let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
            form.push_file(
                name,
                ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                },
            );
        } else {
            let value = field.text().await.map_err(|e| multipart_error(&e))?;
            form.push_text(name, value);
        }
    }

    let draft = form.into_draft()?;
    let product_id = IngestService::new(state.catalog())
        .create_product(draft)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        "Product added successfully!",
        CreatedProduct { product_id },
    )))
}

/// Delete a product with its listings and images.
pub async fn remove(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let id = product_id
        .parse::<ProductId>()
        .map_err(|_| AppError::NotFound(format!("Product {} not found.", product_id.trim())))?;

    IngestService::new(state.catalog()).delete_product(id).await?;
    Ok(Json(ApiResponse::ok()))
}
