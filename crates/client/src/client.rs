//! HTTP client for the catalog API.

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use teefinder_core::{
    ApiResponse, Category, CategoryId, CategoryType, CreatedProduct, Product, ProductDraft,
    ProductId, ResponseStatus, ValidationError,
};

use crate::card::ProductCard;
use crate::error::{ClientError, TransportError};

/// Longest body excerpt written to the log when decoding fails.
const BODY_PREVIEW_CHARS: usize = 200;

/// Typed client for one catalog server.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    adminuser: &'a str,
    password: &'a str,
}

impl CatalogClient {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http(base_url, reqwest::Client::new())
    }

    /// Create a client that sends through an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if `base_url` is not an absolute URL.
    pub fn with_http(base_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }
        // Endpoint paths are joined relative to the base.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Render-ready view of a product, with images resolved against this server.
    #[must_use]
    pub fn card(&self, product: &Product) -> ProductCard {
        ProductCard::new(product, &self.base_url)
    }

    /// Resolve a server-relative URI (such as an image path) against the base.
    #[must_use]
    pub fn resolve(&self, uri: &str) -> Option<Url> {
        self.base_url.join(uri).ok()
    }

    /// Categories of one gender.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` or `ClientError::Application`.
    pub async fn list_categories(
        &self,
        category_type: CategoryType,
    ) -> Result<Vec<Category>, ClientError> {
        self.list_categories_raw(category_type.as_str()).await
    }

    /// Categories for an unchecked gender filter; the server validates it.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Application` for an unknown filter, or
    /// `ClientError::Transport`.
    pub async fn list_categories_raw(
        &self,
        category_type: &str,
    ) -> Result<Vec<Category>, ClientError> {
        let url = self.endpoint("categories", &[("category_type", category_type)])?;
        data(self.send(self.http.get(url)).await?)
    }

    /// Products of a category with their listings.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Application` if the category does not exist, or
    /// `ClientError::Transport`.
    pub async fn list_products(&self, category_id: CategoryId) -> Result<Vec<Product>, ClientError> {
        let id = category_id.to_string();
        let url = self.endpoint("products", &[("category_id", &id)])?;
        data(self.send(self.http.get(url)).await?)
    }

    /// Products of a category whose name contains `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// Same as [`list_products`](Self::list_products).
    pub async fn search_products(
        &self,
        category_id: CategoryId,
        query: &str,
    ) -> Result<Vec<Product>, ClientError> {
        let id = category_id.to_string();
        let url = self.endpoint("products", &[("category_id", &id), ("q", query)])?;
        data(self.send(self.http.get(url)).await?)
    }

    /// Validate and submit a product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` without sending anything if the draft
    /// breaks a rule. Otherwise `ClientError::Application` (e.g. unknown
    /// category) or `ClientError::Transport`.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<ProductId, ClientError> {
        let submission = draft.validate()?;

        let mut form = Form::new();
        for (field, value) in submission.text_fields() {
            form = form.text(field.to_string(), value);
        }
        for (field, image) in submission.file_fields() {
            let part = Part::bytes(image.bytes.clone())
                .file_name(
                    image
                        .file_name
                        .clone()
                        .unwrap_or_else(|| format!("{field}.bin")),
                )
                .mime_str(&image.content_type)
                .map_err(|_| ValidationError::UnsupportedImage {
                    field: field.to_string(),
                    content_type: image.content_type.clone(),
                })?;
            form = form.part(field.to_string(), part);
        }

        let url = self.endpoint("products", &[])?;
        let created: CreatedProduct = data(self.send(self.http.post(url).multipart(form)).await?)?;
        Ok(created.product_id)
    }

    /// Delete a product with its listings and images.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Application` if the product does not exist, or
    /// `ClientError::Transport`.
    pub async fn delete_product(&self, product_id: ProductId) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("products/{product_id}"), &[])?;
        unit(self.send::<()>(self.http.delete(url)).await?)
    }

    /// Check admin credentials.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Application` with the server's message for blank
    /// or wrong credentials, or `ClientError::Transport`.
    pub async fn login(&self, adminuser: &str, password: &str) -> Result<(), ClientError> {
        let url = self.endpoint("admin/login", &[])?;
        let body = LoginBody {
            adminuser,
            password,
        };
        unit(self.send::<()>(self.http.post(url).json(&body)).await?)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = request.send().await.map_err(TransportError::Unreachable)?;
        let status = response.status();
        let body = response.text().await.map_err(TransportError::Unreachable)?;

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = %preview(&body),
                "Catalog server returned an error status"
            );
            return Err(TransportError::Status {
                status: status.as_u16(),
            }
            .into());
        }

        decode(&body)
    }
}

fn preview(body: &str) -> String {
    let mut preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
    if body.chars().count() > BODY_PREVIEW_CHARS {
        preview.push('…');
    }
    preview
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<ApiResponse<T>, ClientError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, body = %preview(body), "Invalid response body");
        TransportError::InvalidBody(e.to_string()).into()
    })
}

fn check<T>(response: ApiResponse<T>) -> Result<Option<T>, ClientError> {
    match response.status {
        ResponseStatus::Success => Ok(response.data),
        ResponseStatus::Error => Err(ClientError::Application {
            message: response
                .message
                .unwrap_or_else(|| "Something went wrong.".to_owned()),
        }),
    }
}

/// Success must carry a payload.
fn data<T>(response: ApiResponse<T>) -> Result<T, ClientError> {
    check(response)?.ok_or_else(|| {
        tracing::error!("Success response without data");
        TransportError::InvalidBody("missing data".to_owned()).into()
    })
}

fn unit(response: ApiResponse<()>) -> Result<(), ClientError> {
    check(response).map(|_| ())
}
