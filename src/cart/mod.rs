//! Cart
//!
//! The shopper's cart for one session. Every mutation keeps lines unique per
//! product and quantities within stock, reports what happened through a
//! [`Notifier`], and writes the cart to its [`CartStorage`].

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use rusty_money::{
    Money,
    iso::{self, Currency},
};

use crate::products::Product;

pub mod line;
pub mod notices;
pub mod storage;

pub use line::CartLine;
pub use notices::{Notice, NoticeKind, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use storage::{CART_STORAGE_KEY, CartStorage, FileStorage, MemoryStorage, StorageError};

/// Cart behaviour settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartConfig {
    /// Remove the stored entry when a removal or quantity update empties the cart.
    ///
    /// When `false`, the last non-empty cart stays in storage until [`Cart::clear`] is called.
    pub clear_storage_when_emptied: bool,

    /// Currency used for aggregates.
    pub currency: &'static Currency,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            clear_storage_when_emptied: true,
            currency: iso::USD,
        }
    }
}

/// Outcome of a cart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was inserted with this quantity.
    Added {
        /// Quantity of the new line
        quantity: u32,
    },

    /// An existing line now has this quantity.
    Updated {
        /// New quantity of the line
        quantity: u32,
    },

    /// The request exceeded stock; the line now holds `quantity` (0 if nothing could be added).
    StockLimited {
        /// Quantity after clamping
        quantity: u32,
    },

    /// The line was removed.
    Removed,

    /// Every line was removed.
    Cleared,

    /// Nothing changed.
    Unchanged,
}

/// The shopping cart.
#[derive(Debug)]
pub struct Cart<S: CartStorage = MemoryStorage, N: Notifier = TracingNotifier> {
    lines: Vec<CartLine>,
    storage: S,
    notifier: N,
    config: CartConfig,
}

impl<S: CartStorage, N: Notifier> Cart<S, N> {
    /// Open the cart held in `storage` with default settings.
    ///
    /// Missing or unreadable data gives an empty cart.
    pub fn open(storage: S, notifier: N) -> Self {
        Self::with_config(storage, notifier, CartConfig::default())
    }

    /// Open the cart held in `storage`.
    ///
    /// Missing or unreadable data gives an empty cart.
    pub fn with_config(storage: S, notifier: N, config: CartConfig) -> Self {
        let lines = restore_lines(&storage);

        tracing::debug!(lines = lines.len(), "opened cart");

        Self {
            lines,
            storage,
            notifier,
            config,
        }
    }

    /// Add `quantity` units of `product`. Adding zero does nothing.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) -> CartChange {
        if quantity == 0 {
            return CartChange::Unchanged;
        }

        let change = if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            let requested = line.quantity.saturating_add(quantity);

            if requested > product.stock {
                line.quantity = product.stock;
                self.notifier.notify(&Notice::stock_limit(product.stock));

                CartChange::StockLimited {
                    quantity: product.stock,
                }
            } else {
                line.quantity = requested;
                self.notifier
                    .notify(&Notice::updated(&product.name, requested));

                CartChange::Updated {
                    quantity: requested,
                }
            }
        } else if quantity > product.stock {
            self.notifier.notify(&Notice::stock_limit(product.stock));

            if product.stock > 0 {
                self.lines.push(CartLine {
                    product: product.clone(),
                    quantity: product.stock,
                });
            }

            CartChange::StockLimited {
                quantity: product.stock,
            }
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity,
            });
            self.notifier.notify(&Notice::added(&product.name));

            CartChange::Added { quantity }
        };

        // A zero-stock product can leave an existing line at 0.
        self.lines.retain(|line| line.quantity > 0);

        tracing::debug!(product = %product.id, ?change, "add to cart");

        self.persist();

        change
    }

    /// Remove the line for `product_id`, if there is one.
    pub fn remove_from_cart(&mut self, product_id: &str) -> CartChange {
        let Some(idx) = self.position(product_id) else {
            return CartChange::Unchanged;
        };

        let line = self.lines.remove(idx);

        self.notifier.notify(&Notice::removed(&line.product.name));

        tracing::debug!(product = %product_id, "removed from cart");

        self.persist();

        CartChange::Removed
    }

    /// Set the quantity for `product_id`. Zero removes the line.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> CartChange {
        if quantity == 0 {
            return self.remove_from_cart(product_id);
        }

        let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
        else {
            return CartChange::Unchanged;
        };

        let stock = line.product.stock;

        let change = if quantity > stock {
            line.quantity = stock;
            self.notifier.notify(&Notice::stock_limit(stock));

            CartChange::StockLimited { quantity: stock }
        } else {
            line.quantity = quantity;

            CartChange::Updated { quantity }
        };

        self.lines.retain(|line| line.quantity > 0);

        tracing::debug!(product = %product_id, ?change, "updated quantity");

        self.persist();

        change
    }

    /// Empty the cart and remove it from storage.
    pub fn clear(&mut self) -> CartChange {
        self.lines.clear();

        if let Err(err) = self.storage.clear() {
            tracing::warn!(error = %err, "failed to clear stored cart");
        }

        self.notifier.notify(&Notice::cleared());

        tracing::debug!("cleared cart");

        CartChange::Cleared
    }

    /// Sum of price times quantity over every line.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        let total: Decimal = self.lines.iter().map(CartLine::line_total).sum();

        Money::from_decimal(total, self.config.currency)
    }

    /// Total number of units in the cart.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Whether `product_id` has a line in the cart.
    pub fn is_in_cart(&self, product_id: &str) -> bool {
        self.position(product_id).is_some()
    }

    /// Units of `product_id` in the cart, 0 if absent.
    pub fn item_quantity(&self, product_id: &str) -> u32 {
        self.line(product_id).map_or(0, |line| line.quantity)
    }

    /// The line for `product_id`.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of the aggregates.
    pub fn currency(&self) -> &'static Currency {
        self.config.currency
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The notice sink.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The notice sink, mutably.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Close the cart, handing back its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product.id == product_id)
    }

    fn persist(&mut self) {
        if self.lines.is_empty() {
            if self.config.clear_storage_when_emptied {
                if let Err(err) = self.storage.clear() {
                    tracing::warn!(error = %err, "failed to clear stored cart");
                }
            }

            return;
        }

        let result = serde_json::to_string(&self.lines)
            .map_err(storage::StorageError::from)
            .and_then(|contents| self.storage.save(&contents));

        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to save cart");
        }
    }
}

fn restore_lines<S: CartStorage>(storage: &S) -> Vec<CartLine> {
    let contents = match storage.load() {
        Ok(Some(contents)) => contents,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read stored cart, starting empty");

            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<CartLine>>(&contents) {
        Ok(lines) => normalise_lines(lines),
        Err(err) => {
            tracing::warn!(error = %err, "stored cart is corrupt, starting empty");

            Vec::new()
        }
    }
}

/// Restore line invariants on stored data: one line per product, first occurrence wins, and every
/// quantity between 1 and the snapshot's stock.
fn normalise_lines(stored: Vec<CartLine>) -> Vec<CartLine> {
    let stored_len = stored.len();
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut clamped = 0_usize;
    let mut lines = Vec::with_capacity(stored_len);

    for mut line in stored {
        if line.quantity == 0 || !seen.insert(line.product.id.clone()) {
            continue;
        }

        if line.quantity > line.product.stock {
            line.quantity = line.product.stock;
            clamped += 1;
        }

        if line.quantity > 0 {
            lines.push(line);
        }
    }

    let dropped = stored_len - lines.len();

    if dropped > 0 || clamped > 0 {
        tracing::warn!(dropped, clamped, "repaired stored cart lines");
    }

    lines
}
