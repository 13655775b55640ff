//! Gender partition of the catalog.

use serde::{Deserialize, Serialize};

/// Error returned when a gender filter is absent or unrecognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("category_type must be \"mens\" or \"womens\" (got {0:?})")]
pub struct CategoryTypeError(pub String);

/// The gender a category is scoped to.
///
/// Decides which client screen surfaces the category; products are never
/// filtered by gender directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    Mens,
    Womens,
}

impl CategoryType {
    /// All recognised values, in display order.
    pub const ALL: [Self; 2] = [Self::Mens, Self::Womens];

    /// Wire and storage spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mens => "mens",
            Self::Womens => "womens",
        }
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CategoryType {
    type Err = CategoryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mens" => Ok(Self::Mens),
            "womens" => Ok(Self::Womens),
            _ => Err(CategoryTypeError(s.to_owned())),
        }
    }
}
