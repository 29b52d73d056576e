//! Fixtures
//!
//! Loads the catalog from a YAML document with `products`, `categories` and
//! `reviews` lists. The storefront's own catalog is compiled into the crate.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError},
    categories::Category,
    products::Product,
    reviews::Review,
};

#[cfg(test)]
pub(crate) mod test_support;

/// The bundled storefront catalog.
const BUNDLED_CATALOG: &str = include_str!("../../fixtures/catalog/candelle.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Product priced below zero
    #[error("Product {0} has a negative price")]
    NegativePrice(String),

    /// Review rating outside 1-5
    #[error("Review {review} has rating {rating}, expected 1-5")]
    InvalidRating {
        /// Review id
        review: String,
        /// Rating found in the fixture
        rating: u8,
    },

    /// Catalog assembly error
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Top-level catalog fixture from YAML.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Product definitions, in display order
    pub products: Vec<Product>,

    /// Category definitions
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Review definitions
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl CatalogFixture {
    fn validate(&self) -> Result<(), FixtureError> {
        if let Some(product) = self
            .products
            .iter()
            .find(|product| product.price < Decimal::ZERO)
        {
            return Err(FixtureError::NegativePrice(product.id.clone()));
        }

        if let Some(review) = self.reviews.iter().find(|review| !review.has_valid_rating()) {
            return Err(FixtureError::InvalidRating {
                review: review.id.clone(),
                rating: review.rating,
            });
        }

        Ok(())
    }
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = FixtureError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        fixture.validate()?;

        Ok(Catalog::new(
            fixture.products,
            fixture.categories,
            fixture.reviews,
        )?)
    }
}

/// Parse a catalog from YAML text.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML is malformed or the data is invalid.
pub fn parse_catalog(contents: &str) -> Result<Catalog, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(contents)?;

    fixture.try_into()
}

/// Load a catalog from a YAML file.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed, or the data is invalid.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, FixtureError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let catalog = parse_catalog(&contents)?;

    tracing::debug!(path = %path.display(), products = catalog.len(), "loaded catalog");

    Ok(catalog)
}

impl Catalog {
    /// The catalog shipped with the storefront.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the bundled fixture is invalid.
    pub fn bundled() -> Result<Self, FixtureError> {
        parse_catalog(BUNDLED_CATALOG)
    }
}
