//! Shop page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::catalog::query::{CatalogQuery, select};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

pub use super::products::ProductCardView;

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopTemplate {
    pub products: Vec<ProductCardView>,
    pub category: Option<String>,
    pub username: Option<String>,
}

/// Display the shop page, filtered and sorted per the query string.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<CatalogQuery>,
) -> Result<ShopTemplate> {
    let selection =
        select(state.catalog(), &query).map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(ShopTemplate {
        products: selection.into_iter().map(ProductCardView::from).collect(),
        category: query.category,
        username: user.map(|u| u.username.to_string()),
    })
}
