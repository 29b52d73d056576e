//! Cart Lines

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::Product;

/// A product snapshot and how many of it the shopper wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product as it was when added
    pub product: Product,

    /// Units in the cart, at least 1 and never above `product.stock`
    pub quantity: u32,
}

impl CartLine {
    /// Price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    /// Id of the product on this line.
    pub fn product_id(&self) -> &str {
        &self.product.id
    }
}
