//! Configuration
//!
//! Command-line arguments with environment fallbacks.

use std::path::PathBuf;

use clap::{Args, Parser};
use thiserror::Error;

use crate::{
    cart::{CartConfig, FileStorage},
    catalog::Catalog,
    cli::Command,
    fixtures::{self, FixtureError},
    wishlist::WISHLIST_STORAGE_KEY,
};

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Arguments or environment values could not be parsed.
    #[error(transparent)]
    Args(#[from] clap::Error),
}

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Where the catalog and cart live.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Directory holding the saved cart
    #[arg(long, env = "CANDELLE_DATA_DIR", default_value = ".candelle")]
    pub data_dir: PathBuf,

    /// Catalog YAML file; the bundled catalog is used when omitted
    #[arg(long, env = "CANDELLE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Keep the last saved cart when removals empty it
    #[arg(long, env = "CANDELLE_KEEP_STALE_CART", default_value_t = false)]
    pub keep_stale_cart: bool,
}

impl StoreConfig {
    /// Load the configured catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the catalog file cannot be read or is invalid.
    pub fn load_catalog(&self) -> Result<Catalog, FixtureError> {
        match &self.catalog {
            Some(path) => fixtures::load_catalog(path),
            None => Catalog::bundled(),
        }
    }

    /// Storage for the saved cart.
    pub fn cart_storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }

    /// Storage for the saved wishlist, next to the cart.
    pub fn wishlist_storage(&self) -> FileStorage {
        FileStorage::with_key(&self.data_dir, WISHLIST_STORAGE_KEY)
    }

    /// Cart behaviour derived from these settings.
    pub fn cart_config(&self) -> CartConfig {
        CartConfig {
            clear_storage_when_emptied: !self.keep_stale_cart,
            ..CartConfig::default()
        }
    }
}

/// Candelle storefront configuration
#[derive(Debug, Parser)]
#[command(name = "candelle", about = "Candelle storefront", long_about = None)]
pub struct Config {
    /// Catalog and cart locations.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Ok(Self::try_parse()?)
    }
}
