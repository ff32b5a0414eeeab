//! Per-user flat-file JSON stores.
//!
//! Each store is one JSON document mapping usernames to per-user records
//! (`cart.json`, `wishlist.json`). The document is loaded fully on every
//! access and rewritten fully on every mutation. A store-wide async mutex is
//! held across the whole read-modify-write sequence so concurrent requests
//! cannot lose updates, and persistence goes through a temp file followed by
//! a rename so a crash never leaves a torn document behind.

mod cart;
mod wishlist;

pub use cart::{CartRecord, CartStore};
pub use wishlist::{WishlistRecord, WishlistStore};

use std::collections::HashMap;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;

use greengrocer_core::{ProductId, Username};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the store file failed.
    #[error("store file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file holds something that is not a store document.
    #[error("store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The product id is not in the catalog.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// The product id is not in the user's record.
    #[error("product {0} is not in this list")]
    AbsentProduct(ProductId),
}

/// One JSON document mapping usernames to records of type `R`.
pub struct JsonFileStore<R> {
    path: PathBuf,
    lock: Mutex<()>,
    _record: PhantomData<R>,
}

impl<R> JsonFileStore<R>
where
    R: Default + Clone + Serialize + DeserializeOwned,
{
    /// Create a store backed by the given file path.
    ///
    /// The file is created lazily on first access.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// Fetch a user's record, lazily initializing (and persisting) it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] / [`StoreError::Corrupt`] on file failures.
    pub async fn record(&self, user: &Username) -> Result<R, StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        if let Some(record) = records.get(user.as_str()) {
            return Ok(record.clone());
        }

        let record = R::default();
        records.insert(user.as_str().to_owned(), record.clone());
        self.persist(&records).await?;
        Ok(record)
    }

    /// Run a read-modify-write cycle on a user's record.
    ///
    /// The whole sequence holds the store lock. A missing user is
    /// initialized with the record default before `apply` runs. If `apply`
    /// fails, nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns whatever `apply` returns, or [`StoreError::Io`] /
    /// [`StoreError::Corrupt`] on file failures.
    pub async fn update<T, F>(&self, user: &Username, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut R) -> Result<T, StoreError>,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        let record = records.entry(user.as_str().to_owned()).or_default();
        let outcome = apply(record)?;

        self.persist(&records).await?;
        Ok(outcome)
    }

    /// Load the whole document. A missing file is an empty store.
    async fn load(&self) -> Result<HashMap<String, R>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrite the whole document atomically (temp file + rename).
    async fn persist(&self, records: &HashMap<String, R>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
