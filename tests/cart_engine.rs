//! Integration tests for the cart engine driven by products from the bundled catalog.

use anyhow::{Result, anyhow};
use rusty_money::{Money, iso::USD};
use tempfile::TempDir;
use testresult::TestResult;

use candelle::prelude::*;

fn product(catalog: &Catalog, id: &str) -> Result<Product> {
    catalog
        .product(id)
        .cloned()
        .ok_or(anyhow!("{id} product not found"))
}

#[test]
fn adding_beyond_stock_clamps_and_warns() -> TestResult {
    let catalog = Catalog::bundled()?;
    let vanilla = product(&catalog, "vanilla-dream")?;

    let mut cart = Cart::open(MemoryStorage::new(), RecordingNotifier::new());

    let change = cart.add_to_cart(&vanilla, 20);

    assert_eq!(change, CartChange::StockLimited { quantity: 15 });
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.item_quantity("vanilla-dream"), 15);
    assert_eq!(cart.subtotal(), Money::from_minor(37485, USD));

    let notice = cart.notifier().last().ok_or("expected a notice")?;

    assert_eq!(notice.kind, NoticeKind::StockLimit);
    assert_eq!(notice.severity, Severity::Destructive);
    assert_eq!(
        notice.detail,
        "Sorry, we only have 15 units of this item in stock."
    );

    Ok(())
}

#[test]
fn lines_keep_insertion_order_and_aggregate() -> TestResult {
    let catalog = Catalog::bundled()?;
    let mut cart = Cart::open(MemoryStorage::new(), RecordingNotifier::new());

    cart.add_to_cart(&product(&catalog, "rose-garden")?, 1);
    cart.add_to_cart(&product(&catalog, "citrus-grove")?, 2);
    cart.add_to_cart(&product(&catalog, "rose-garden")?, 1);

    let ids: Vec<&str> = cart.iter().map(CartLine::product_id).collect();

    assert_eq!(ids, ["rose-garden", "citrus-grove"]);
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.subtotal(), Money::from_minor(2 * 2899 + 2 * 2299, USD));

    let summary = OrderSummary::for_cart(&cart);

    assert!(summary.ships_free());
    assert_eq!(summary.tax, Money::from_minor(832, USD));
    assert_eq!(summary.total, Money::from_minor(11228, USD));

    Ok(())
}

#[test]
fn remove_is_idempotent_and_update_to_zero_removes() -> TestResult {
    let catalog = Catalog::bundled()?;
    let mut cart = Cart::open(MemoryStorage::new(), RecordingNotifier::new());

    cart.add_to_cart(&product(&catalog, "ocean-breeze")?, 2);
    cart.add_to_cart(&product(&catalog, "apple-cider")?, 1);

    assert_eq!(cart.remove_from_cart("apple-cider"), CartChange::Removed);
    assert_eq!(cart.remove_from_cart("apple-cider"), CartChange::Unchanged);
    assert!(!cart.is_in_cart("apple-cider"));

    assert_eq!(
        cart.update_quantity("ocean-breeze", 0),
        CartChange::Removed
    );
    assert!(cart.is_empty());
    assert_eq!(cart.subtotal(), Money::from_minor(0, USD));
    assert_eq!(cart.storage().contents(), None);

    Ok(())
}

#[test]
fn update_quantity_clamps_to_snapshot_stock() -> TestResult {
    let catalog = Catalog::bundled()?;
    let mut cart = Cart::open(MemoryStorage::new(), RecordingNotifier::new());

    cart.add_to_cart(&product(&catalog, "sandalwood-amber")?, 1);

    assert_eq!(
        cart.update_quantity("sandalwood-amber", 50),
        CartChange::StockLimited { quantity: 8 }
    );
    assert_eq!(
        cart.update_quantity("no-such-candle", 3),
        CartChange::Unchanged
    );

    Ok(())
}

#[test]
fn file_backed_cart_survives_reopening() -> TestResult {
    let dir = TempDir::new()?;
    let catalog = Catalog::bundled()?;

    let mut cart = Cart::open(FileStorage::new(dir.path()), RecordingNotifier::new());

    cart.add_to_cart(&product(&catalog, "lavender-fields")?, 3);
    cart.add_to_cart(&product(&catalog, "cedar-pine")?, 1);

    let saved = cart.lines().to_vec();

    assert!(dir.path().join(format!("{CART_STORAGE_KEY}.json")).exists());

    let reopened = Cart::open(FileStorage::new(dir.path()), RecordingNotifier::new());

    assert_eq!(reopened.lines(), saved.as_slice());
    assert!(reopened.notifier().notices().is_empty());

    Ok(())
}

#[test]
fn clearing_removes_the_saved_file() -> TestResult {
    let dir = TempDir::new()?;
    let catalog = Catalog::bundled()?;

    let mut cart = Cart::open(FileStorage::new(dir.path()), RecordingNotifier::new());

    cart.add_to_cart(&product(&catalog, "coconut-paradise")?, 1);

    assert_eq!(cart.clear(), CartChange::Cleared);
    assert!(!cart.storage().path().exists());

    let reopened = Cart::open(FileStorage::new(dir.path()), RecordingNotifier::new());

    assert!(reopened.is_empty());

    Ok(())
}

#[test]
fn stale_cart_can_be_kept_when_emptied() -> TestResult {
    let dir = TempDir::new()?;
    let catalog = Catalog::bundled()?;
    let config = CartConfig {
        clear_storage_when_emptied: false,
        ..CartConfig::default()
    };

    let mut cart = Cart::with_config(
        FileStorage::new(dir.path()),
        RecordingNotifier::new(),
        config,
    );

    cart.add_to_cart(&product(&catalog, "linen-breeze")?, 2);
    cart.remove_from_cart("linen-breeze");

    assert!(cart.is_empty());

    let reopened = Cart::open(FileStorage::new(dir.path()), RecordingNotifier::new());

    assert_eq!(reopened.item_quantity("linen-breeze"), 2);

    Ok(())
}

#[test]
fn corrupt_storage_opens_empty() {
    let cart = Cart::open(
        MemoryStorage::with_contents("not json"),
        RecordingNotifier::new(),
    );

    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
}
