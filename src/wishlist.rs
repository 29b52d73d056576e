//! Wishlist
//!
//! Product ids the shopper saved for later, kept in their own storage record.

use rustc_hash::FxHashSet;

use crate::{
    cart::{Cart, CartChange, CartStorage, MemoryStorage, Notifier, StorageError},
    catalog::Catalog,
    products::Product,
};

/// Storage key for the saved wishlist.
pub const WISHLIST_STORAGE_KEY: &str = "candelle-wishlist";

/// Saved product ids in the order they were added.
#[derive(Debug)]
pub struct Wishlist<S: CartStorage = MemoryStorage> {
    ids: Vec<String>,
    storage: S,
}

impl<S: CartStorage> Wishlist<S> {
    /// Open the wishlist held in `storage`.
    ///
    /// Missing or unreadable data gives an empty wishlist.
    pub fn open(storage: S) -> Self {
        let ids = restore_ids(&storage);

        tracing::debug!(items = ids.len(), "opened wishlist");

        Self { ids, storage }
    }

    /// Save `product_id`. Returns `false` if it was already saved.
    pub fn add(&mut self, product_id: &str) -> bool {
        if self.contains(product_id) {
            return false;
        }

        self.ids.push(product_id.to_string());
        self.persist();

        true
    }

    /// Forget `product_id`. Returns `false` if it was not saved.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.ids.len();

        self.ids.retain(|id| id != product_id);

        if self.ids.len() == before {
            return false;
        }

        self.persist();

        true
    }

    /// Add one unit of a saved product to `cart` and drop it from the wishlist.
    ///
    /// The product stays saved when nothing could be added. Returns `None` when the id is not
    /// saved or not in the catalog.
    pub fn move_to_cart<C: CartStorage, N: Notifier>(
        &mut self,
        product_id: &str,
        catalog: &Catalog,
        cart: &mut Cart<C, N>,
    ) -> Option<CartChange> {
        if !self.contains(product_id) {
            return None;
        }

        let product = catalog.product(product_id)?;
        let change = cart.add_to_cart(product, 1);

        if !matches!(change, CartChange::StockLimited { quantity: 0 }) {
            self.remove(product_id);
        }

        Some(change)
    }

    /// Whether `product_id` is saved.
    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    /// Saved ids, oldest first.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Saved products still in the catalog, in catalog order.
    pub fn products<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog
            .all_products()
            .iter()
            .filter(|product| self.contains(&product.id))
            .collect()
    }

    /// Number of saved ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.ids)
            .map_err(StorageError::from)
            .and_then(|contents| self.storage.save(&contents));

        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to save wishlist");
        }
    }
}

fn restore_ids<S: CartStorage>(storage: &S) -> Vec<String> {
    let contents = match storage.load() {
        Ok(Some(contents)) => contents,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read stored wishlist, starting empty");

            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&contents) {
        Ok(mut ids) => {
            let mut seen = FxHashSet::default();

            ids.retain(|id| seen.insert(id.clone()));

            ids
        }
        Err(err) => {
            tracing::warn!(error = %err, "stored wishlist is corrupt, starting empty");

            Vec::new()
        }
    }
}
