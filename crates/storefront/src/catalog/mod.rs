//! Static product catalog.
//!
//! The catalog is a hardcoded in-memory table built at startup and immutable
//! at runtime. Products are looked up by id or by their detail-page slug;
//! filtering and sorting live in [`query`].

mod data;
pub mod query;

use std::collections::HashMap;

use serde::Serialize;

use greengrocer_core::{Price, ProductId};

/// A purchasable catalog item.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Catalog id, unique and stable.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Category key used for filtering (e.g. `"fruits"`).
    pub category: String,
    /// Discount percentage, if the product is on sale.
    pub discount: Option<u32>,
    /// Price before any discount.
    pub price_before: Price,
    /// Effective price.
    pub price_after: Price,
    /// Average review rating, 0.0 - 5.0.
    pub rating: f32,
    /// Number of reviews.
    pub review: u32,
    /// Units sold to date.
    pub sold_value: u32,
    /// Stock on hand, in weight units.
    pub weight_in_stock: u32,
    /// Path to the product image under `/static`.
    pub image: String,
    /// Detail-page slug (e.g. `"strawberries"`).
    pub slug: String,
}

/// The static product table.
pub struct Catalog {
    products: HashMap<ProductId, Product>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// The builtin seed catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(data::seed())
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Whether a product id exists in the catalog.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.contains_key(id)
    }

    /// Look up a product by its detail-page slug.
    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.values().find(|p| p.slug == slug)
    }

    /// Iterate over all products, in no particular order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
