//! Store-side record types.
//!
//! These mirror what the catalog store holds. The query service turns them
//! into the wire types in `teefinder_core::catalog`.

pub mod admin;
pub mod catalog;

pub use admin::AdminCredentials;
pub use catalog::{ListingRecord, ProductRecord, StoredImage};
