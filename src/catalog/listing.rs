//! Shop listing: filter, sort and paginate the catalog.

use std::{cmp::Ordering, fmt, str::FromStr};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{catalog::Catalog, products::Product};

/// Products shown per shop page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Unknown sort order name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown sort order: {0}")]
pub struct ParseSortOrderError(String);

/// Ordering applied to a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Catalog order
    #[default]
    Relevance,

    /// Cheapest first
    PriceAsc,

    /// Most expensive first
    PriceDesc,

    /// Alphabetical
    NameAsc,

    /// Reverse alphabetical
    NameDesc,

    /// Most recently added first
    Newest,
}

impl SortOrder {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOrder::Relevance => Ordering::Equal,
            SortOrder::PriceAsc => a.price.cmp(&b.price),
            SortOrder::PriceDesc => b.price.cmp(&a.price),
            SortOrder::NameAsc => compare_names(a, b),
            SortOrder::NameDesc => compare_names(b, a),
            SortOrder::Newest => b.created_at.cmp(&a.created_at),
        }
    }

    /// The query-string name of this sort order.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
            SortOrder::Newest => "newest",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(SortOrder::Relevance),
            "price-asc" => Ok(SortOrder::PriceAsc),
            "price-desc" => Ok(SortOrder::PriceDesc),
            "name-asc" => Ok(SortOrder::NameAsc),
            "name-desc" => Ok(SortOrder::NameDesc),
            "newest" => Ok(SortOrder::Newest),
            other => Err(ParseSortOrderError(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Filters, ordering and page selection for a shop listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Only products in this category
    pub category: Option<String>,

    /// Only products matching this search text
    pub search: Option<String>,

    /// Inclusive lower price bound
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound
    pub max_price: Option<Decimal>,

    /// Ordering of the results
    pub sort: SortOrder,

    /// 1-based page number
    pub page: usize,

    /// Products per page
    pub page_size: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            min_price: None,
            max_price: None,
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductQuery {
    fn matches(&self, product: &Product, needle: Option<&str>) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| product.category == category)
            && needle.is_none_or(|needle| product.matches_lowercase(needle))
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
    }
}

/// One page of a shop listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage<'a> {
    /// Products on this page
    pub products: Vec<&'a Product>,

    /// Number of products matching the filters across all pages
    pub total: usize,

    /// 1-based page number
    pub page: usize,

    /// Number of pages
    pub total_pages: usize,
}

impl ProductPage<'_> {
    /// Whether a page follows this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

impl Catalog {
    /// Run a shop listing query.
    pub fn list(&self, query: &ProductQuery) -> ProductPage<'_> {
        let needle = query
            .search
            .as_deref()
            .filter(|search| !search.is_empty())
            .map(str::to_lowercase);

        let mut products: Vec<&Product> = self
            .all_products()
            .iter()
            .filter(|product| query.matches(product, needle.as_deref()))
            .collect();

        products.sort_by(|a, b| query.sort.compare(a, b));

        let total = products.len();
        let page_size = query.page_size.max(1);
        let page = query.page.max(1);
        let start = (page - 1).saturating_mul(page_size);

        let products = products
            .into_iter()
            .skip(start)
            .take(page_size)
            .collect();

        ProductPage {
            products,
            total,
            page,
            total_pages: total.div_ceil(page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::fixtures::test_support::{product, timestamp};

    use super::*;

    fn catalog() -> TestResult<Catalog> {
        let mut newest = product("rose-garden", "floral", 2899, &["rose"]);
        newest.created_at = timestamp("2023-03-15T00:00:00Z");

        Ok(Catalog::new(
            vec![
                product("vanilla-dream", "classic", 2499, &["vanilla"]),
                product("citrus-grove", "fresh", 2299, &["citrus"]),
                product("ocean-breeze", "fresh", 2599, &["ocean", "clean"]),
                product("linen-breeze", "fresh", 2399, &["linen", "clean"]),
                newest,
            ],
            Vec::new(),
            Vec::new(),
        )?)
    }

    fn ids<'a>(page: &ProductPage<'a>) -> Vec<&'a str> {
        page.products
            .iter()
            .map(|product| product.id.as_str())
            .collect()
    }

    #[test]
    fn default_query_lists_catalog_in_order() -> TestResult {
        let catalog = catalog()?;

        let page = catalog.list(&ProductQuery::default());

        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 1);
        assert_eq!(ids(&page).first(), Some(&"vanilla-dream"));
        assert!(!page.has_next());
        assert!(!page.has_previous());

        Ok(())
    }

    #[test]
    fn search_composes_with_category_and_price() -> TestResult {
        let catalog = catalog()?;

        let page = catalog.list(&ProductQuery {
            category: Some("fresh".to_string()),
            search: Some("Clean".to_string()),
            max_price: Some(Decimal::new(2500, 2)),
            ..ProductQuery::default()
        });

        assert_eq!(ids(&page), ["linen-breeze"]);

        Ok(())
    }

    #[test]
    fn price_bounds_are_inclusive() -> TestResult {
        let catalog = catalog()?;

        let page = catalog.list(&ProductQuery {
            min_price: Some(Decimal::new(2399, 2)),
            max_price: Some(Decimal::new(2499, 2)),
            ..ProductQuery::default()
        });

        assert_eq!(ids(&page), ["vanilla-dream", "linen-breeze"]);

        Ok(())
    }

    #[test]
    fn sort_orders() -> TestResult {
        let catalog = catalog()?;

        let by = |sort| {
            let query = ProductQuery {
                sort,
                ..ProductQuery::default()
            };

            ids(&catalog.list(&query))
        };

        assert_eq!(
            by(SortOrder::PriceAsc),
            ["citrus-grove", "linen-breeze", "vanilla-dream", "ocean-breeze", "rose-garden"]
        );
        assert_eq!(by(SortOrder::PriceDesc).first(), Some(&"rose-garden"));
        assert_eq!(by(SortOrder::NameAsc).first(), Some(&"citrus-grove"));
        assert_eq!(by(SortOrder::NameDesc).first(), Some(&"vanilla-dream"));
        assert_eq!(by(SortOrder::Newest).first(), Some(&"rose-garden"));

        Ok(())
    }

    #[test]
    fn pages_partition_results() -> TestResult {
        let catalog = catalog()?;

        let page = |page| {
            catalog.list(&ProductQuery {
                page,
                page_size: 2,
                ..ProductQuery::default()
            })
        };

        let first = page(1);
        let last = page(3);

        assert_eq!(first.total_pages, 3);
        assert_eq!(ids(&first), ["vanilla-dream", "citrus-grove"]);
        assert!(first.has_next());
        assert_eq!(ids(&last), ["rose-garden"]);
        assert!(last.has_previous());
        assert!(page(4).products.is_empty());
        assert_eq!(ids(&page(0)), ids(&first));

        Ok(())
    }

    #[test]
    fn sort_order_round_trips_through_str() {
        for sort in [
            SortOrder::Relevance,
            SortOrder::PriceAsc,
            SortOrder::PriceDesc,
            SortOrder::NameAsc,
            SortOrder::NameDesc,
            SortOrder::Newest,
        ] {
            assert_eq!(sort.as_str().parse::<SortOrder>(), Ok(sort));
        }

        assert!("cheapest".parse::<SortOrder>().is_err());
    }
}
