//! Integration tests for catalog queries against the bundled storefront catalog.

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use testresult::TestResult;

use candelle::prelude::*;

#[test]
fn every_product_is_found_by_its_id() -> TestResult {
    let catalog = Catalog::bundled()?;

    assert_eq!(catalog.len(), 12);

    for product in catalog.all_products() {
        assert_eq!(catalog.product(&product.id), Some(product));
    }

    assert_eq!(catalog.product("no-such-candle"), None);

    Ok(())
}

#[test]
fn categories_partition_the_catalog() -> TestResult {
    let catalog = Catalog::bundled()?;

    let total: usize = catalog
        .all_categories()
        .iter()
        .map(|category| catalog.products_by_category(&category.id).len())
        .sum();

    assert_eq!(total, catalog.len());

    let fresh: Vec<&str> = catalog
        .products_by_category("fresh")
        .into_iter()
        .map(|product| product.id.as_str())
        .collect();

    assert_eq!(
        fresh,
        ["citrus-grove", "ocean-breeze", "coconut-paradise", "linen-breeze"]
    );

    Ok(())
}

#[test]
fn search_matches_name_description_and_tags() -> TestResult {
    let catalog = Catalog::bundled()?;

    let by_name: Vec<&str> = catalog
        .search("VANILLA")
        .into_iter()
        .map(|product| product.id.as_str())
        .collect();

    assert!(by_name.contains(&"vanilla-dream"));

    let by_tag: Vec<&str> = catalog
        .search("woody")
        .into_iter()
        .map(|product| product.id.as_str())
        .collect();

    assert!(by_tag.contains(&"sandalwood-amber"));
    assert!(by_tag.contains(&"cedar-pine"));

    assert_eq!(catalog.search("").len(), catalog.len());
    assert!(catalog.search("zzz").is_empty());

    Ok(())
}

#[test]
fn featured_sale_and_new_arrivals() -> TestResult {
    let catalog = Catalog::bundled()?;

    let featured: Vec<&str> = catalog
        .featured_products()
        .into_iter()
        .map(|product| product.id.as_str())
        .collect();

    assert_eq!(featured, ["vanilla-dream", "lavender-fields", "citrus-grove"]);

    let on_sale: Vec<&str> = catalog
        .products_on_sale()
        .into_iter()
        .map(|product| product.id.as_str())
        .collect();

    assert_eq!(on_sale, ["citrus-grove"]);

    let newest: Vec<&str> = catalog
        .new_arrivals(2)
        .into_iter()
        .map(|product| product.id.as_str())
        .collect();

    assert_eq!(newest, ["rose-garden", "cedar-pine"]);

    Ok(())
}

#[test]
fn average_ratings() -> TestResult {
    let catalog = Catalog::bundled()?;

    assert_eq!(catalog.average_rating("vanilla-dream"), Some(Decimal::new(45, 1)));
    assert_eq!(catalog.average_rating("lavender-fields"), Some(Decimal::from(5)));
    assert_eq!(catalog.average_rating("rose-garden"), None);
    assert!(catalog.reviews("rose-garden").is_empty());

    Ok(())
}

#[test]
fn related_products_never_include_self_or_repeat() -> TestResult {
    let catalog = Catalog::bundled()?;

    for product in catalog.all_products() {
        let related = catalog.related_products(&product.id, 4);

        assert_eq!(related.len(), 4, "related products of {}", product.id);
        assert!(related.iter().all(|other| other.id != product.id));

        let unique: FxHashSet<&str> = related.iter().map(|other| other.id.as_str()).collect();

        assert_eq!(unique.len(), related.len());
    }

    assert!(catalog.related_products("no-such-candle", 4).is_empty());

    Ok(())
}

#[test]
fn related_products_prefer_same_category() -> TestResult {
    let catalog = Catalog::bundled()?;

    let related = catalog.related_products("citrus-grove", 4);

    assert!(related.iter().take(3).all(|other| other.category == "fresh"));

    Ok(())
}

#[test]
fn listing_pages_partition_the_filtered_result() -> TestResult {
    let catalog = Catalog::bundled()?;

    let query = ProductQuery {
        sort: SortOrder::PriceAsc,
        page_size: 5,
        ..ProductQuery::default()
    };

    let mut seen = Vec::new();

    for page in 1..=3 {
        let listing = catalog.list(&ProductQuery {
            page,
            ..query.clone()
        });

        assert_eq!(listing.total, 12);
        assert_eq!(listing.total_pages, 3);

        seen.extend(listing.products.iter().map(|product| product.id.clone()));
    }

    assert_eq!(seen.len(), 12);
    assert_eq!(seen.first().map(String::as_str), Some("citrus-grove"));
    assert_eq!(seen.last().map(String::as_str), Some("sandalwood-amber"));

    Ok(())
}

#[test]
fn listing_filters_compose() -> TestResult {
    let catalog = Catalog::bundled()?;

    let listing = catalog.list(&ProductQuery {
        category: Some("fresh".to_string()),
        search: Some("breeze".to_string()),
        max_price: Some(Decimal::new(2400, 2)),
        ..ProductQuery::default()
    });

    let ids: Vec<&str> = listing
        .products
        .iter()
        .map(|product| product.id.as_str())
        .collect();

    assert_eq!(ids, ["linen-breeze"]);
    assert!(!listing.has_next());
    assert!(!listing.has_previous());

    Ok(())
}
