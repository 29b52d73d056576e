//! Catalog
//!
//! Read-only queries over the fixed set of products, categories and reviews.

use rust_decimal::{Decimal, RoundingStrategy};
use rustc_hash::FxHashMap;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::{categories::Category, products::Product, reviews::Review};

pub mod listing;
mod related;

pub use listing::{DEFAULT_PAGE_SIZE, ProductPage, ProductQuery, SortOrder};

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two products share the same id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Two categories share the same id.
    #[error("Duplicate category id: {0}")]
    DuplicateCategory(String),
}

/// The product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    reviews: Vec<Review>,

    /// Product id -> index into `products`
    product_index: FxHashMap<String, usize>,

    currency: &'static Currency,
}

impl Catalog {
    /// Build a catalog from already-parsed data, priced in US dollars.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if product or category ids are not unique.
    pub fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        reviews: Vec<Review>,
    ) -> Result<Self, CatalogError> {
        Self::with_currency(products, categories, reviews, iso::USD)
    }

    /// Build a catalog priced in the given currency.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if product or category ids are not unique.
    pub fn with_currency(
        products: Vec<Product>,
        categories: Vec<Category>,
        reviews: Vec<Review>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut product_index = FxHashMap::default();

        for (idx, product) in products.iter().enumerate() {
            if product_index.insert(product.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        let mut seen_categories = FxHashMap::default();

        for category in &categories {
            if seen_categories.insert(category.id.as_str(), ()).is_some() {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        Ok(Self {
            products,
            categories,
            reviews,
            product_index,
            currency,
        })
    }

    /// Currency every price in the catalog is expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Every product, in declaration order.
    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.product_index
            .get(id)
            .and_then(|&idx| self.products.get(idx))
    }

    /// Products in the given category.
    pub fn products_by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Products whose name, description or tags contain `query`, ignoring case.
    ///
    /// An empty query matches every product.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();

        self.products
            .iter()
            .filter(|product| product.matches_lowercase(&needle))
            .collect()
    }

    /// Products flagged as featured.
    pub fn featured_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.featured)
            .collect()
    }

    /// The `limit` most recently added products, newest first.
    pub fn new_arrivals(&self, limit: usize) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();

        // `sort_by` is stable, so equal timestamps keep catalog order.
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products.truncate(limit);

        products
    }

    /// Products priced below their original price.
    pub fn products_on_sale(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.is_on_sale())
            .collect()
    }

    /// Every category, in declaration order.
    pub fn all_categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Categories flagged as featured.
    pub fn featured_categories(&self) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|category| category.featured)
            .collect()
    }

    /// Reviews for a product, in insertion order.
    pub fn reviews(&self, product_id: &str) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|review| review.product_id == product_id)
            .collect()
    }

    /// Mean review rating for a product, rounded to one decimal place.
    ///
    /// Returns `None` when the product has no reviews.
    pub fn average_rating(&self, product_id: &str) -> Option<Decimal> {
        let (sum, count) = self
            .reviews
            .iter()
            .filter(|review| review.product_id == product_id)
            .fold((0_u32, 0_u32), |(sum, count), review| {
                (sum + u32::from(review.rating), count + 1)
            });

        if count == 0 {
            return None;
        }

        let mean = Decimal::from(sum) / Decimal::from(count);

        Some(mean.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Up to `limit` products to recommend alongside `product_id`.
    ///
    /// Returns an empty list for unknown products.
    pub fn related_products(&self, product_id: &str, limit: usize) -> Vec<&Product> {
        match self.product(product_id) {
            Some(target) => related::related_products(&self.products, target, limit),
            None => Vec::new(),
        }
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
