//! Cart store: per-user product-id → quantity maps.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use greengrocer_core::{ProductId, Username};

use super::{JsonFileStore, StoreError};
use crate::catalog::Catalog;

/// One user's cart.
///
/// Invariant: every quantity is at least 1; removing a product deletes its
/// key entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartRecord {
    pub products: HashMap<ProductId, u32>,
}

/// The cart store, backed by `cart.json`.
pub struct CartStore {
    store: JsonFileStore<CartRecord>,
}

impl CartStore {
    /// Create a cart store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonFileStore::new(path),
        }
    }

    /// The user's cart, lazily initialized.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on file failures.
    pub async fn view(&self, user: &Username) -> Result<CartRecord, StoreError> {
        self.store.record(user).await
    }

    /// Add one unit of a product to the user's cart.
    ///
    /// A product not yet in the cart starts at quantity 1; an existing one
    /// is incremented.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownProduct`] if the id is not in the
    /// catalog.
    pub async fn add(
        &self,
        user: &Username,
        id: &ProductId,
        catalog: &Catalog,
    ) -> Result<(), StoreError> {
        if !catalog.contains(id) {
            return Err(StoreError::UnknownProduct(id.clone()));
        }

        self.store
            .update(user, |cart| {
                *cart.products.entry(id.clone()).or_insert(0) += 1;
                Ok(())
            })
            .await
    }

    /// Remove a product from the user's cart entirely.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AbsentProduct`] if the id is not in the cart;
    /// the store file is left untouched in that case.
    pub async fn remove(&self, user: &Username, id: &ProductId) -> Result<(), StoreError> {
        self.store
            .update(user, |cart| {
                if cart.products.remove(id).is_none() {
                    return Err(StoreError::AbsentProduct(id.clone()));
                }
                Ok(())
            })
            .await
    }
}
