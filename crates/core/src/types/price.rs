//! Listing prices: a positive decimal amount or the out-of-stock sentinel.
//!
//! Prices travel as strings on the wire (`"299"`, `"49.90"`, `"OUT_OF_STOCK"`).
//! Amounts keep the scale they were submitted with, so the text a retailer
//! price was entered as is the text it is rendered as.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Price`] or a base rate.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is empty or only whitespace.
    #[error("price cannot be empty")]
    Empty,
    /// The input is neither a decimal number nor the sentinel.
    #[error("{0:?} is not a number")]
    NotANumber(String),
    /// The amount is zero or negative.
    #[error("amount must be greater than zero")]
    NotPositive,
}

/// A retailer's price for one platform listing.
///
/// ## Examples
///
/// ```
/// use teefinder_core::Price;
///
/// let price: Price = "299".parse().unwrap();
/// assert_eq!(price.to_string(), "299");
///
/// let gone: Price = "Out of stock".parse().unwrap();
/// assert_eq!(gone, Price::OutOfStock);
/// assert_eq!(gone.to_string(), "OUT_OF_STOCK");
///
/// assert!("0".parse::<Price>().is_err());
/// assert!("cheap".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Price {
    /// Purchasable at this amount (always > 0).
    Amount(Decimal),
    /// Not currently purchasable on this platform.
    OutOfStock,
}

impl Price {
    /// Canonical wire spelling of the out-of-stock sentinel.
    pub const OUT_OF_STOCK: &'static str = "OUT_OF_STOCK";

    /// Parse a price from user or wire input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a decimal number, or not
    /// strictly positive.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed == Self::OUT_OF_STOCK || trimmed.eq_ignore_ascii_case("out of stock") {
            return Ok(Self::OutOfStock);
        }
        parse_amount(trimmed).map(Self::Amount)
    }

    /// The amount, or `None` when out of stock.
    #[must_use]
    pub const fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::OutOfStock => None,
        }
    }

    /// Whether this listing can currently be bought.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        matches!(self, Self::Amount(_))
    }
}

/// Parse a strictly positive decimal amount, used for listing prices and
/// product base rates alike.
///
/// # Errors
///
/// Returns an error if the input is empty, not a plain `digits[.digits]`
/// decimal, or not strictly positive.
pub fn parse_amount(s: &str) -> Result<Decimal, PriceError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(PriceError::Empty);
    }
    if !is_plain_decimal(trimmed) {
        return Err(PriceError::NotANumber(trimmed.to_owned()));
    }
    let amount =
        Decimal::from_str(trimmed).map_err(|_| PriceError::NotANumber(trimmed.to_owned()))?;
    if amount <= Decimal::ZERO {
        return Err(PriceError::NotPositive);
    }
    Ok(amount)
}

/// `digits[.digits]` with an optional leading `-`, and no leading zeros in
/// the integer part. Anything `Decimal::from_str` would rewrite (`+5`,
/// `1_000`, `299.`, `007`) fails here so amounts render as submitted.
fn is_plain_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    digits(int)
        && (int.len() == 1 || !int.starts_with('0'))
        && frac.is_none_or(digits)
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(amount) => write!(f, "{amount}"),
            Self::OutOfStock => f.write_str(Self::OUT_OF_STOCK),
        }
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

/// Accepts both the string form and bare JSON numbers.
struct PriceVisitor;

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a positive decimal amount or \"OUT_OF_STOCK\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Price::parse(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Price::parse(&v.to_string()).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Price::parse(&v.to_string()).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Price::parse(&v.to_string()).map_err(E::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_keeps_submitted_scale() {
        assert_eq!(Price::parse("49.90").unwrap().to_string(), "49.90");
        assert_eq!(Price::parse(" 299 ").unwrap().to_string(), "299");
    }

    #[test]
    fn test_sentinel_spellings() {
        assert_eq!(Price::parse("OUT_OF_STOCK").unwrap(), Price::OutOfStock);
        assert_eq!(Price::parse("out of stock").unwrap(), Price::OutOfStock);
        assert_eq!(Price::parse("Out Of Stock").unwrap(), Price::OutOfStock);
    }

    #[test]
    fn test_rejects_empty_zero_negative_and_text() {
        assert_eq!(Price::parse("  "), Err(PriceError::Empty));
        assert_eq!(Price::parse("0"), Err(PriceError::NotPositive));
        assert_eq!(Price::parse("-1.5"), Err(PriceError::NotPositive));
        assert!(matches!(
            Price::parse("₹299"),
            Err(PriceError::NotANumber(_))
        ));
        for rewritten in ["+5", "1_000", "299.", "007", ".5", "1e3", "1.2.3", "- 5"] {
            assert_eq!(
                Price::parse(rewritten),
                Err(PriceError::NotANumber(rewritten.to_owned())),
                "{rewritten} should be rejected"
            );
        }
    }

    #[test]
    fn test_plain_decimals_are_accepted_verbatim() {
        for literal in ["5", "0.5", "10.00", "1000", "49.90"] {
            assert_eq!(Price::parse(literal).unwrap().to_string(), literal);
            assert_eq!(parse_amount(literal).unwrap().to_string(), literal);
        }
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Price::parse("12.5").unwrap()).unwrap();
        assert_eq!(json, "\"12.5\"");
        let json = serde_json::to_string(&Price::OutOfStock).unwrap();
        assert_eq!(json, "\"OUT_OF_STOCK\"");
    }

    #[test]
    fn test_deserializes_string_or_number() {
        let from_number: Price = serde_json::from_str("299").unwrap();
        let from_string: Price = serde_json::from_str("\"299\"").unwrap();
        assert_eq!(from_number, from_string);

        let sentinel: Price = serde_json::from_str("\"OUT_OF_STOCK\"").unwrap();
        assert!(!sentinel.is_in_stock());
        assert!(serde_json::from_str::<Price>("null").is_err());
    }

    #[test]
    fn test_amount_accessor() {
        assert_eq!(Price::OutOfStock.amount(), None);
        assert_eq!(
            Price::parse("10").unwrap().amount(),
            Some(Decimal::new(10, 0))
        );
    }
}
