//! Teefinder catalog client.
//!
//! The typed consumer the presentation layers call into. It validates
//! submissions before anything is sent, encodes the multipart ingestion
//! layout, decodes the response envelope and keeps transport failures apart
//! from application errors. Nothing is retried.
//!
//! ```rust,ignore
//! let client = CatalogClient::new("http://127.0.0.1:8080")?;
//! let categories = client.list_categories(CategoryType::Mens).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod card;
pub mod client;
pub mod error;

pub use card::{ListingCard, PLACEHOLDER_IMAGE, ProductCard};
pub use client::CatalogClient;
pub use error::{ClientError, TransportError};
