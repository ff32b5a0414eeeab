//! Wishlist store: per-user saved product-id lists.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use greengrocer_core::{ProductId, Username};

use super::{JsonFileStore, StoreError};
use crate::catalog::Catalog;

/// One user's wishlist. Holds no duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WishlistRecord {
    pub products: Vec<ProductId>,
}

/// The wishlist store, backed by `wishlist.json`.
pub struct WishlistStore {
    store: JsonFileStore<WishlistRecord>,
}

impl WishlistStore {
    /// Create a wishlist store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonFileStore::new(path),
        }
    }

    /// The user's wishlist, lazily initialized.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on file failures.
    pub async fn view(&self, user: &Username) -> Result<WishlistRecord, StoreError> {
        self.store.record(user).await
    }

    /// Save a product to the user's wishlist.
    ///
    /// Saving a product that is already on the list is a no-op success.
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
            .update(user, |wishlist| {
                if !wishlist.products.contains(id) {
                    wishlist.products.push(id.clone());
                }
                Ok(())
            })
            .await
    }

    /// Remove a product from the user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AbsentProduct`] if the id is not on the list;
    /// the store file is left untouched in that case.
    pub async fn remove(&self, user: &Username, id: &ProductId) -> Result<(), StoreError> {
        self.store
            .update(user, |wishlist| {
                let Some(position) = wishlist.products.iter().position(|p| p == id) else {
                    return Err(StoreError::AbsentProduct(id.clone()));
                };
                wishlist.products.remove(position);
                Ok(())
            })
            .await
    }
}
