//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::store::{CartStore, WishlistStore};
use crate::weather::{WeatherClient, WeatherError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the flat-file stores, and the weather client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    carts: CartStore,
    wishlists: WishlistStore,
    weather: WeatherClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The flat-file stores land under the configured data directory as
    /// `cart.json` and `wishlist.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the weather HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, WeatherError> {
        let catalog = Catalog::builtin();
        let carts = CartStore::new(config.data_dir.join("cart.json"));
        let wishlists = WishlistStore::new(config.data_dir.join("wishlist.json"));
        let weather = WeatherClient::new(&config.weather)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
                wishlists,
                weather,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }

    /// Get a reference to the wishlist store.
    #[must_use]
    pub fn wishlists(&self) -> &WishlistStore {
        &self.inner.wishlists
    }

    /// Get a reference to the weather client.
    #[must_use]
    pub fn weather(&self) -> &WeatherClient {
        &self.inner.weather
    }
}
