//! Category route handlers.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use teefinder_core::{ApiResponse, Category};

use crate::error::{AppError, Result};
use crate::services::catalog::CatalogService;
use crate::state::AppState;

/// Query parameters for `GET /categories`.
#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    pub category_type: Option<String>,
}

/// List the categories of one gender.
pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<CategoriesQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Category>>>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let categories = CatalogService::new(state.catalog(), state.image_links())
        .list_categories(query.category_type.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(categories)))
}
