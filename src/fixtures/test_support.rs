use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{categories::Category, products::Product, reviews::Review, tags::TagSet};

pub(crate) fn timestamp(s: &str) -> Timestamp {
    s.parse().expect("valid RFC 3339 timestamp")
}

/// A product with ten units in stock, priced in cents.
pub(crate) fn product(id: &str, category: &str, price_cents: i64, tags: &[&str]) -> Product {
    let name = id.replace('-', " ");

    Product {
        id: id.to_string(),
        description: format!("The {name} candle."),
        name,
        short_description: None,
        price: Decimal::new(price_cents, 2),
        original_price: None,
        category: category.to_string(),
        tags: TagSet::from_strs(tags),
        stock: 10,
        featured: false,
        burn_time: None,
        scent_notes: Vec::new(),
        created_at: timestamp("2023-01-15T00:00:00Z"),
        updated_at: timestamp("2023-03-20T00:00:00Z"),
    }
}

pub(crate) fn category(id: &str) -> Category {
    Category {
        id: id.to_string(),
        name: id.to_uppercase(),
        description: format!("{id} scents"),
        featured: false,
    }
}

pub(crate) fn review(id: &str, product_id: &str, rating: u8) -> Review {
    Review {
        id: id.to_string(),
        product_id: product_id.to_string(),
        user_name: "Sarah J.".to_string(),
        rating,
        title: "Lovely".to_string(),
        content: "Burns evenly.".to_string(),
        created_at: timestamp("2023-05-15T00:00:00Z"),
        verified: true,
    }
}
