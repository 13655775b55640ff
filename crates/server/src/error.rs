//! Unified error handling with Sentry integration.
//!
//! Every failure leaves the server as the `{status: "error", message}`
//! envelope. Application outcomes (validation, missing references, rejected
//! login) use HTTP 200 so clients can tell them apart from transport
//! failures. Server errors are captured to Sentry and never expose details.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use teefinder_core::{ApiResponse, ValidationError};

use crate::db::RepositoryError;
use crate::services::CatalogError;
use crate::services::auth::AuthError;

/// Application-level error type for the catalog server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request broke a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Login rejected.
    #[error("Invalid adminuser or password.")]
    InvalidCredentials,

    /// Image blob does not exist. Served as a plain 404.
    #[error("Image not found.")]
    ImageNotFound,

    /// Request could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body over the configured limit.
    #[error("Request body is too large.")]
    PayloadTooLarge,

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => Self::Validation(e),
            CatalogError::CategoryNotFound(_) | CatalogError::ProductNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            CatalogError::Repository(e) => Self::Database(e),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => Self::Validation(e),
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::Repository(e) => Self::Database(e),
            AuthError::UserAlreadyExists | AuthError::PasswordHash => {
                Self::Internal(err.to_string())
            }
        }
    }
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::NotFound(_) | Self::InvalidCredentials => StatusCode::OK,
            Self::ImageNotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (self.status(), Json(ApiResponse::<()>::error(message))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use teefinder_core::{CategoryId, ProductId};

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_application_errors_are_200_envelopes() {
        let (status, body) = render(ValidationError::MissingField("image").into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "status": "error",
                "message": "Please fill all the fields: image is required."
            })
        );

        let (status, body) =
            render(CatalogError::CategoryNotFound(CategoryId::new(9)).into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Category 9 not found.");

        let (status, body) = render(AuthError::InvalidCredentials.into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Invalid adminuser or password.");
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let (status, body) =
            render(AppError::Database(RepositoryError::DataCorruption("secret".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_transport_level_statuses() {
        assert_eq!(render(AppError::BadRequest("x".into())).await.0, StatusCode::BAD_REQUEST);
        assert_eq!(render(AppError::PayloadTooLarge).await.0, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(render(AppError::ImageNotFound).await.0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_product_not_found_message() {
        let err = AppError::from(CatalogError::ProductNotFound(ProductId::new(4)));
        assert_eq!(err.to_string(), "Product 4 not found.");
    }
}
