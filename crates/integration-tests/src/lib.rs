//! Integration test harness for Teefinder.
//!
//! Each test spawns the real router on an ephemeral port over a fresh
//! in-memory store, then drives it through `teefinder-client` or raw
//! `reqwest` when it needs to send something the client would refuse to.
//!
//! ```bash
//! cargo test -p teefinder-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tokio::net::TcpListener;

use teefinder_client::CatalogClient;
use teefinder_core::{CategoryId, CategoryType, ImageUpload, PlatformDraft, ProductDraft};
use teefinder_server::config::DEFAULT_MAX_UPLOAD_BYTES;
use teefinder_server::db::{CatalogStore, MemoryStore};
use teefinder_server::services::auth::AuthService;
use teefinder_server::services::catalog::ImageLinks;
use teefinder_server::{AppState, router};

/// Seeded admin login name.
pub const ADMIN_USER: &str = "admin";
/// Seeded admin password.
pub const ADMIN_PASSWORD: &str = "secret";

/// A running server plus clients pointed at it.
pub struct TestServer {
    pub base_url: String,
    pub client: CatalogClient,
    pub http: reqwest::Client,
    pub store: Arc<MemoryStore>,
}

impl TestServer {
    /// Spawn with the default body limit.
    pub async fn spawn() -> Self {
        Self::spawn_with_limit(DEFAULT_MAX_UPLOAD_BYTES).await
    }

    /// Spawn with a custom request body limit.
    pub async fn spawn_with_limit(max_upload_bytes: usize) -> Self {
        let store = Arc::new(MemoryStore::new());
        AuthService::new(store.as_ref())
            .create_admin(ADMIN_USER, ADMIN_PASSWORD)
            .await
            .expect("Failed to seed admin user");

        let state = AppState::in_memory(store.clone(), ImageLinks::default());
        let app = router(state, max_upload_bytes);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        let base_url = format!("http://{addr}");
        let client = CatalogClient::new(&base_url).expect("Invalid test base URL");

        Self {
            base_url,
            client,
            http: reqwest::Client::new(),
            store,
        }
    }

    /// Absolute URL for a server path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Create a category directly in the store.
    pub async fn category(&self, name: &str, category_type: CategoryType) -> CategoryId {
        self.store
            .create_category(name, category_type)
            .await
            .expect("Failed to create category")
            .category_id
    }
}

/// A small JPEG-typed upload. The bytes only need to be non-empty.
#[must_use]
pub fn jpeg(file_name: &str) -> ImageUpload {
    ImageUpload::new(file_name, "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])
}

/// The Amazon / Flipkart product used across tests.
#[must_use]
pub fn amazon_flipkart_draft(category_id: CategoryId) -> ProductDraft {
    ProductDraft::new(category_id, "Stylish T-Shirt", "499")
        .with_image(jpeg("tee.jpg"))
        .with_platform(PlatformDraft::new("Amazon", "https://a.example", "299"))
        .with_platform(PlatformDraft::new(
            "Flipkart",
            "https://f.example",
            "OUT_OF_STOCK",
        ))
}

/// Multipart file part carrying [`jpeg`] bytes.
#[must_use]
pub fn jpeg_part(file_name: &str) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(jpeg(file_name).bytes)
        .file_name(file_name.to_owned())
        .mime_str("image/jpeg")
        .expect("static mime type is valid")
}
