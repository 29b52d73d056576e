//! Candelle
//!
//! Candelle is the storefront core of a candle shop: a static product catalog with its queries, and a
//! persisted shopping cart that clamps quantities to stock and reports what happened to the shopper.

pub mod cart;
pub mod catalog;
pub mod categories;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod fixtures;
pub mod logging;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod reviews;
pub mod tags;
pub mod wishlist;
