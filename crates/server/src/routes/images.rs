//! Image blob handler.

use axum::{
    extract::{Path, State},
    http::{
        HeaderValue,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};

use teefinder_core::ImageId;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Serve a stored image with its content type.
///
/// Image ids are never reused, so the blob can be cached forever.
pub async fn show(
    State(state): State<AppState>,
    Path(image_id): Path<String>,
) -> Result<Response> {
    let image_id = image_id
        .parse::<ImageId>()
        .map_err(|_| AppError::ImageNotFound)?;
    let image = state
        .catalog()
        .image(image_id)
        .await?
        .ok_or(AppError::ImageNotFound)?;

    let content_type = HeaderValue::from_str(&image.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    Ok((
        [
            (CONTENT_TYPE, content_type),
            (
                CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=31536000, immutable"),
            ),
        ],
        image.data,
    )
        .into_response())
}
