//! Product route handlers.
//!
//! `/products` answers JSON (single product by id, or a filtered/sorted
//! listing); `/products/{key}` renders the detail page and accepts either a
//! numeric catalog id or a slug on the same path segment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use greengrocer_core::ProductId;

use crate::catalog::query::{CatalogQuery, select};
use crate::catalog::{Product, query};
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Product display data for listing cards.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub rating: f32,
    pub image: String,
    pub slug: String,
}

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub compare_at_price: Option<String>,
    pub discount: Option<u32>,
    pub rating: f32,
    pub review: u32,
    pub sold_value: u32,
    pub weight_in_stock: u32,
    pub image: String,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price_after.display(),
            compare_at_price: product
                .discount
                .map(|_| product.price_before.display()),
            rating: product.rating,
            image: product.image.clone(),
            slug: product.slug.clone(),
        }
    }
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price_after.display(),
            compare_at_price: product
                .discount
                .map(|_| product.price_before.display()),
            discount: product.discount,
            rating: product.rating,
            review: product.review,
            sold_value: product.sold_value,
            weight_in_stock: product.weight_in_stock,
            image: product.image.clone(),
        }
    }
}

/// Query parameters for the catalog JSON endpoint.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub id: Option<String>,
    pub category: Option<String>,
    pub ordering: Option<String>,
    pub reverse: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub related_products: Vec<ProductCardView>,
}

/// Catalog JSON endpoint.
///
/// With `?id=`, answers the single product or 404. Otherwise answers the
/// listing filtered by `?category=` and sorted by `?ordering=`/`?reverse=`.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ProductsQuery>,
) -> Result<Response> {
    if let Some(id) = params.id {
        let product_id = ProductId::new(id);
        let product = state
            .catalog()
            .get(&product_id)
            .ok_or_else(|| AppError::NotFound(format!("product {product_id} is not in the catalog")))?;
        return Ok(Json(product.clone()).into_response());
    }

    let catalog_query = CatalogQuery {
        category: params.category,
        ordering: params.ordering,
        reverse: params.reverse,
    };
    let selection = select(state.catalog(), &catalog_query)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let products: Vec<Product> = selection.into_iter().cloned().collect();
    Ok(Json(products).into_response())
}

/// Display product detail page.
///
/// `key` is a numeric catalog id or a detail-page slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<ProductShowTemplate> {
    let catalog = state.catalog();

    let product = if key.chars().all(|c| c.is_ascii_digit()) {
        catalog.get(&ProductId::new(key.as_str()))
    } else {
        catalog.by_slug(&key)
    }
    .ok_or_else(|| AppError::NotFound(format!("no product for '{key}'")))?;

    let related_products = query::related_products(catalog, product)
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    Ok(ProductShowTemplate {
        product: ProductDetailView::from(product),
        related_products,
    })
}
