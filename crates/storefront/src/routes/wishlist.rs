//! Wishlist route handlers.
//!
//! Same shape as the cart routes: login required, username keys the store,
//! mutations ride on GET.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use greengrocer_core::ProductId;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

pub use super::cart::Answer;
pub use super::products::ProductCardView;

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistShowTemplate {
    pub products: Vec<ProductCardView>,
}

/// Display the wishlist page.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<WishlistShowTemplate> {
    let record = state.wishlists().view(&user.username).await?;

    let products = record
        .products
        .iter()
        .filter_map(|id| state.catalog().get(id))
        .map(ProductCardView::from)
        .collect();

    Ok(WishlistShowTemplate { products })
}

/// Save a product to the wishlist.
#[instrument(skip(state, user))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Answer>> {
    let id = ProductId::new(id);
    state
        .wishlists()
        .add(&user.username, &id, state.catalog())
        .await?;

    Ok(Json(Answer {
        answer: "Product saved to wishlist".to_string(),
    }))
}

/// Remove a product from the wishlist.
#[instrument(skip(state, user))]
pub async fn del(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Answer>> {
    let id = ProductId::new(id);
    state.wishlists().remove(&user.username, &id).await?;

    Ok(Json(Answer {
        answer: "Product removed from wishlist".to_string(),
    }))
}
