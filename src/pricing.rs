//! Pricing
//!
//! Shipping, tax and order totals shown on the cart and checkout pages.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};

use crate::cart::{Cart, CartStorage, Notifier};

/// Orders above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(5000, 0, 0, false, 2);

/// Flat shipping charge below the free-shipping threshold.
pub const SHIPPING_FEE: Decimal = Decimal::from_parts(599, 0, 0, false, 2);

/// Sales tax applied to the subtotal.
pub fn tax_rate() -> Percentage {
    Percentage::from(Decimal::new(8, 2))
}

/// Order totals derived from a cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderSummary<'a> {
    /// Sum of the cart lines
    pub subtotal: Money<'a, Currency>,

    /// Shipping charge, zero when free
    pub shipping: Money<'a, Currency>,

    /// Sales tax on the subtotal
    pub tax: Money<'a, Currency>,

    /// Subtotal plus shipping plus tax
    pub total: Money<'a, Currency>,

    /// How much more to spend for free shipping, when the subtotal is below the threshold
    pub free_shipping_remaining: Option<Money<'a, Currency>>,
}

impl<'a> OrderSummary<'a> {
    /// Summarise an order with the given subtotal.
    pub fn for_subtotal(subtotal: Money<'a, Currency>) -> Self {
        let currency = subtotal.currency();
        let amount = *subtotal.amount();

        let shipping = if amount > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            SHIPPING_FEE
        };

        let tax = (tax_rate() * amount)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let free_shipping_remaining = (amount < FREE_SHIPPING_THRESHOLD)
            .then(|| Money::from_decimal(FREE_SHIPPING_THRESHOLD - amount, currency));

        Self {
            subtotal,
            shipping: Money::from_decimal(shipping, currency),
            tax: Money::from_decimal(tax, currency),
            total: Money::from_decimal(amount + shipping + tax, currency),
            free_shipping_remaining,
        }
    }

    /// Whether shipping is free.
    pub fn ships_free(&self) -> bool {
        self.shipping.is_zero()
    }
}

impl OrderSummary<'static> {
    /// Summarise the contents of a cart.
    pub fn for_cart<S: CartStorage, N: Notifier>(cart: &Cart<S, N>) -> Self {
        Self::for_subtotal(cart.subtotal())
    }
}
