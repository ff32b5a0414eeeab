//! Cart route handlers.
//!
//! All cart routes require a logged-in user; the username keys the
//! flat-file cart store. Mutations ride on GET, matching the storefront's
//! link-driven pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use greengrocer_core::{Price, ProductId};

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;
use crate::store::CartRecord;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: Price::ZERO.display(),
            item_count: 0,
        }
    }

    /// Resolve a cart record against the catalog.
    fn build(state: &AppState, record: &CartRecord) -> Self {
        let mut entries: Vec<(&ProductId, &u32)> = record.products.iter().collect();
        // Deterministic rendering order over the hash map
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut items = Vec::new();
        let mut line_totals = Vec::new();
        let mut item_count = 0;

        for (id, &quantity) in entries {
            // Ids were validated against the catalog on insert
            let Some(product) = state.catalog().get(id) else {
                tracing::warn!(product = %id, "cart references a product no longer in the catalog");
                continue;
            };
            let line_total = product.price_after.times(quantity);
            line_totals.push(line_total);
            item_count += quantity;
            items.push(CartItemView {
                id: id.to_string(),
                slug: product.slug.clone(),
                name: product.name.clone(),
                quantity,
                price: product.price_after.display(),
                line_total: line_total.display(),
            });
        }

        Self {
            items,
            subtotal: Price::total(line_totals).display(),
            item_count,
        }
    }
}

/// JSON answer envelope for cart mutations.
#[derive(Debug, Serialize)]
pub struct Answer {
    pub answer: String,
}

/// Query parameters for the cart page.
#[derive(Debug, Deserialize)]
pub struct CartShowQuery {
    pub format: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Display the cart page, or the raw record with `?format=JSON`.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<CartShowQuery>,
) -> Result<Response> {
    let record = state.carts().view(&user.username).await?;

    if query.format.as_deref() == Some("JSON") {
        return Ok(Json(record).into_response());
    }

    Ok(CartShowTemplate {
        cart: CartView::build(&state, &record),
    }
    .into_response())
}

/// Add one unit of a product to the cart.
#[instrument(skip(state, user))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Answer>> {
    let id = ProductId::new(id);
    state
        .carts()
        .add(&user.username, &id, state.catalog())
        .await?;

    Ok(Json(Answer {
        answer: "Product added to cart".to_string(),
    }))
}

/// Remove a product from the cart.
#[instrument(skip(state, user))]
pub async fn del(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Answer>> {
    let id = ProductId::new(id);
    state.carts().remove(&user.username, &id).await?;

    Ok(Json(Answer {
        answer: "Product removed from cart".to_string(),
    }))
}

/// Add a product to the cart and jump straight to the cart page.
#[instrument(skip(state, user))]
pub async fn buy_now(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    state
        .carts()
        .add(&user.username, &id, state.catalog())
        .await?;

    Ok(Redirect::to("/cart"))
}

/// Remove a product from the cart and refresh the cart page.
#[instrument(skip(state, user))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    state.carts().remove(&user.username, &id).await?;

    Ok(Redirect::to("/cart"))
}
