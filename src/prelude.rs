//! Candelle prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CART_STORAGE_KEY, Cart, CartChange, CartConfig, CartLine, CartStorage, FileStorage,
        MemoryStorage, Notice, NoticeKind, Notifier, RecordingNotifier, Severity, StorageError,
        TracingNotifier,
    },
    catalog::{Catalog, CatalogError, ProductPage, ProductQuery, SortOrder},
    categories::Category,
    checkout::{CheckoutError, FieldError, Order, ShippingDetails, ShippingField},
    fixtures::{FixtureError, load_catalog, parse_catalog},
    pricing::OrderSummary,
    products::Product,
    receipt::{Receipt, ReceiptError},
    reviews::Review,
    tags::TagSet,
    wishlist::{WISHLIST_STORAGE_KEY, Wishlist},
};
