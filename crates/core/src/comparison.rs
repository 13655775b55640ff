//! Price comparison across a product's listings.
//!
//! Listings are never reordered: the first one stays the visually primary
//! listing, and the comparison only points at positions.

use rust_decimal::Decimal;

use crate::catalog::PlatformListing;

/// Summary of a product's listing prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceComparison {
    /// Lowest in-stock amount, if any listing is in stock.
    pub lowest: Option<Decimal>,
    /// Positions (in submission order) offering the lowest amount.
    pub lowest_positions: Vec<usize>,
    /// Number of listings currently purchasable.
    pub in_stock: usize,
    /// Total number of listings.
    pub total: usize,
}

impl PriceComparison {
    /// Compare the given listings.
    #[must_use]
    pub fn of(listings: &[PlatformListing]) -> Self {
        let mut lowest: Option<Decimal> = None;
        let mut lowest_positions = Vec::new();
        let mut in_stock = 0;

        for (position, amount) in listings
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.price.amount().map(|a| (i, a)))
        {
            in_stock += 1;
            match lowest {
                Some(current) if amount > current => {}
                Some(current) if amount == current => lowest_positions.push(position),
                _ => {
                    lowest = Some(amount);
                    lowest_positions.clear();
                    lowest_positions.push(position);
                }
            }
        }

        Self {
            lowest,
            lowest_positions,
            in_stock,
            total: listings.len(),
        }
    }

    /// Whether no listing can currently be bought.
    #[must_use]
    pub const fn all_out_of_stock(&self) -> bool {
        self.in_stock == 0
    }

    /// Whether the listing at `position` is (one of) the cheapest.
    #[must_use]
    pub fn is_lowest(&self, position: usize) -> bool {
        self.lowest_positions.contains(&position)
    }
}
