//! Render-ready view of a product for the comparison screen.

use rust_decimal::Decimal;
use url::Url;

use teefinder_core::{Price, PriceComparison, Product, ProductId};

/// Shown when a product or listing has no usable image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/100";

/// A product ready to render: resolved image, listings in submission order,
/// and the cheapest listing(s) marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub rate: Decimal,
    /// Absolute image URL, or [`PLACEHOLDER_IMAGE`].
    pub image: String,
    pub listings: Vec<ListingCard>,
    pub comparison: PriceComparison,
}

/// One platform row on a [`ProductCard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCard {
    pub platform_name: String,
    pub price: Price,
    /// Amount as submitted, or "Out of stock".
    pub price_label: String,
    /// External page to hand off to; `None` if the stored link is not an
    /// absolute http(s) URL.
    pub deep_link: Option<Url>,
    pub image: Option<String>,
    /// First listing in submission order.
    pub is_primary: bool,
    /// Cheapest in-stock listing (ties all marked).
    pub is_lowest: bool,
}

impl ProductCard {
    /// Build a card, resolving image URIs against `base`.
    #[must_use]
    pub fn new(product: &Product, base: &Url) -> Self {
        let comparison = PriceComparison::of(&product.platforms);
        let listings = product
            .platforms
            .iter()
            .enumerate()
            .map(|(position, listing)| ListingCard {
                platform_name: listing.platform_name.clone(),
                price: listing.price,
                price_label: price_label(listing.price),
                deep_link: deep_link(&listing.product_link),
                image: listing
                    .image
                    .as_deref()
                    .and_then(|uri| resolve(base, uri)),
                is_primary: position == 0,
                is_lowest: comparison.is_lowest(position),
            })
            .collect();

        Self {
            product_id: product.product_id,
            name: product.name.clone(),
            description: product.description.clone(),
            rate: product.rate,
            image: product
                .image
                .as_deref()
                .and_then(|uri| resolve(base, uri))
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned()),
            listings,
            comparison,
        }
    }

    /// The primary (first) listing, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&ListingCard> {
        self.listings.first()
    }
}

fn resolve(base: &Url, uri: &str) -> Option<String> {
    base.join(uri).ok().map(String::from)
}

fn price_label(price: Price) -> String {
    match price {
        Price::Amount(amount) => amount.to_string(),
        Price::OutOfStock => "Out of stock".to_owned(),
    }
}

fn deep_link(link: &str) -> Option<Url> {
    Url::parse(link.trim())
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use teefinder_core::{CategoryId, PlatformId, PlatformListing};

    use super::*;

    fn listing(name: &str, price: &str, link: &str) -> PlatformListing {
        PlatformListing {
            platform_id: PlatformId::new(1),
            platform_name: name.to_owned(),
            price: Price::parse(price).unwrap(),
            product_link: link.to_owned(),
            image: None,
        }
    }

    fn product(image: Option<&str>, platforms: Vec<PlatformListing>) -> Product {
        Product {
            product_id: ProductId::new(1),
            category_id: CategoryId::new(1),
            name: "Raglan Tee".to_owned(),
            description: String::new(),
            rate: Decimal::new(59900, 2),
            image: image.map(str::to_owned),
            platforms,
        }
    }

    fn base() -> Url {
        Url::parse("http://localhost:8080/").unwrap()
    }

    #[test]
    fn test_missing_image_uses_placeholder() {
        let card = ProductCard::new(&product(None, vec![]), &base());
        assert_eq!(card.image, PLACEHOLDER_IMAGE);
        assert!(card.primary().is_none());
    }

    #[test]
    fn test_relative_image_resolved() {
        let card = ProductCard::new(&product(Some("/images/3"), vec![]), &base());
        assert_eq!(card.image, "http://localhost:8080/images/3");
    }

    #[test]
    fn test_listings_keep_order_and_mark_lowest() {
        let card = ProductCard::new(
            &product(
                None,
                vec![
                    listing("Amazon", "299", "https://a.example/p"),
                    listing("Flipkart", "OUT_OF_STOCK", "https://f.example/p"),
                    listing("Myntra", "249.00", "not a url"),
                ],
            ),
            &base(),
        );

        let names: Vec<_> = card.listings.iter().map(|l| l.platform_name.as_str()).collect();
        assert_eq!(names, ["Amazon", "Flipkart", "Myntra"]);
        assert!(card.listings[0].is_primary);
        assert!(card.listings[2].is_lowest);
        assert!(!card.listings[0].is_lowest);
        assert_eq!(card.listings[0].price_label, "299");
        assert_eq!(card.listings[1].price_label, "Out of stock");
        assert_eq!(card.listings[2].price_label, "249.00");
        assert!(card.listings[0].deep_link.is_some());
        assert!(card.listings[2].deep_link.is_none());
    }

    #[test]
    fn test_non_http_links_are_not_deep_links() {
        assert!(deep_link("javascript:alert(1)").is_none());
        assert!(deep_link(" https://shop.example/item?id=7 ").is_some());
    }
}
