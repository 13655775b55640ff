//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                      - Liveness
//! GET    /health/ready                - Store reachability (503 when down)
//!
//! # Catalog queries
//! GET    /categories?category_type=   - Categories of one gender
//! GET    /products?category_id=&q=    - Products with nested platform listings
//! GET    /images/{image_id}           - Stored image blob
//!
//! # Catalog ingestion
//! POST   /products                    - Multipart product + listings + images
//! DELETE /products/{product_id}       - Remove a product and everything it owns
//!
//! # Admin
//! POST   /admin/login                 - Check admin credentials
//! ```
//!
//! Every JSON response uses the `{status, message?, data?}` envelope.

pub mod admin;
pub mod categories;
pub mod images;
pub mod products;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request, State},
    http::{Method, StatusCode},
    middleware,
    routing::{delete, get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Build the application router with its middleware stack.
///
/// Sentry layers are added by the binary so tests can run without a hub.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/categories", get(categories::list))
        .route("/products", get(products::list).post(products::create))
        .route("/products/{product_id}", delete(products::remove))
        .route("/images/{image_id}", get(images::show))
        .route("/admin/login", post(admin::login))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the catalog store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.catalog().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
