//! Teefinder Core - Shared catalog types library.
//!
//! This crate provides the types shared by all Teefinder components:
//! - `server` - Catalog HTTP service (query, ingestion, admin login)
//! - `client` - Typed consumer used by the presentation layers
//! - `cli` - Command-line tools for migrations and catalog administration
//!
//! # Architecture
//!
//! The core crate contains only types and rules - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows both ends of the wire
//! to apply the same validation.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices and the gender partition
//! - [`catalog`] - The category → product → listing tree returned to clients
//! - [`envelope`] - The `{status, message, data}` response envelope
//! - [`submission`] - Ingestion drafts, validation and multipart field names
//! - [`comparison`] - Cheapest-listing summary for rendering

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod comparison;
pub mod envelope;
pub mod submission;
pub mod types;

pub use catalog::{Category, CreatedProduct, PlatformListing, Product};
pub use comparison::PriceComparison;
pub use envelope::{ApiResponse, ResponseStatus};
pub use submission::{
    ImageData, ImageUpload, PlatformDraft, ProductDraft, ProductSubmission, ValidationError,
};
pub use types::*;
