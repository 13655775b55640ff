//! Core types for Teefinder.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category_type;
pub mod id;
pub mod price;

pub use category_type::{CategoryType, CategoryTypeError};
pub use id::*;
pub use price::{Price, PriceError, parse_amount};
