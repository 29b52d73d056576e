//! Cart Storage
//!
//! Durable key-value backends holding one serialized record each: the cart, or the wishlist.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Key the cart is stored under.
pub const CART_STORAGE_KEY: &str = "candelle-cart";

/// Errors raised by cart storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing the backing store
    #[error("Storage IO error: {0}")]
    Io(#[from] io::Error),

    /// The record could not be encoded or decoded
    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A durable home for one serialized record, such as the cart.
pub trait CartStorage {
    /// Read the stored cart, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be written.
    fn save(&mut self, contents: &str) -> Result<(), StorageError>;

    /// Remove the stored cart. Removing a missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be written.
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-process storage, the equivalent of browser local storage for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with raw contents.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    /// The raw stored contents, if any.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, contents: &str) -> Result<(), StorageError> {
        self.contents = Some(contents.to_string());

        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.contents = None;

        Ok(())
    }
}

/// Stores the cart as `<key>.json` inside a data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage under the default cart key inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_key(dir, CART_STORAGE_KEY)
    }

    /// Storage under a custom key inside `dir`.
    pub fn with_key(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, contents: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Readers only ever see a complete file.
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
