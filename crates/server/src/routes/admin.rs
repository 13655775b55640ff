//! Admin route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;

use teefinder_core::ApiResponse;

use crate::error::{AppError, Result};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login request body. Missing fields are treated as blank.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub adminuser: String,
    #[serde(default)]
    pub password: String,
}

/// Check admin credentials.
///
/// Success is reported in the envelope only; no session is created.
pub async fn login(
    State(state): State<AppState>,
    body: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    AuthService::new(state.admins())
        .login(&request.adminuser, &request.password)
        .await?;

    Ok(Json(ApiResponse::ok()))
}
