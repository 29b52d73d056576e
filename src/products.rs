//! Products

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tags::TagSet;

/// A candle in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product id, also used as the URL slug
    pub id: String,

    /// Display name
    pub name: String,

    /// Full description
    pub description: String,

    /// Shorter description for cards and listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    /// Current price
    pub price: Decimal,

    /// Price before a discount, only meaningful when greater than `price`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,

    /// Category key
    pub category: String,

    /// Tags used for search and recommendations
    #[serde(default)]
    pub tags: TagSet,

    /// Units in stock
    pub stock: u32,

    /// Whether the product is featured on the home page
    #[serde(default)]
    pub featured: bool,

    /// Approximate burn time in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_time: Option<u32>,

    /// Fragrance notes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scent_notes: Vec<String>,

    /// When the product was first added
    pub created_at: Timestamp,

    /// When the product was last updated
    pub updated_at: Timestamp,
}

impl Product {
    /// Whether the product is discounted from its original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .is_some_and(|original| original > self.price)
    }

    /// Whether the product has any stock left.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Case-insensitive substring match against name, description and tags.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.any_contains_lowercase(needle)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::fixtures::test_support::product;

    use super::*;

    #[test]
    fn is_on_sale_requires_higher_original_price() {
        let mut candle = product("citrus-grove", "fresh", 2299, &["citrus"]);

        assert!(!candle.is_on_sale());

        candle.original_price = Some(Decimal::new(2599, 2));
        assert!(candle.is_on_sale());

        candle.original_price = Some(Decimal::new(2299, 2));
        assert!(!candle.is_on_sale());
    }

    #[test]
    fn matches_lowercase_checks_name_description_and_tags() {
        let candle = product("ocean-breeze", "fresh", 2599, &["Clean", "ocean"]);

        assert!(candle.matches_lowercase("breeze"));
        assert!(candle.matches_lowercase("clean"));
        assert!(!candle.matches_lowercase("lavender"));
    }

    #[test]
    fn deserializes_camel_case_json() -> TestResult {
        let candle: Product = serde_json::from_str(
            r#"{
                "id": "rose-garden",
                "name": "Rose Garden",
                "description": "Delicate rose with peony.",
                "price": 28.99,
                "originalPrice": "31.99",
                "category": "floral",
                "tags": ["rose", "floral"],
                "stock": 10,
                "createdAt": "2023-03-15T00:00:00Z",
                "updatedAt": "2023-05-05T00:00:00Z"
            }"#,
        )?;

        assert_eq!(candle.price, Decimal::new(2899, 2));
        assert_eq!(candle.original_price, Some(Decimal::new(3199, 2)));
        assert!(!candle.featured);
        assert!(candle.tags.contains("floral"));

        Ok(())
    }
}
