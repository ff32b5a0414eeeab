//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Shop page (category/ordering/reverse query)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (data directory usable)
//!
//! # Products
//! GET  /products               - Catalog JSON (?id= | ?category=&ordering=&reverse=)
//! GET  /products/{key}         - Product detail page by numeric id or slug
//!
//! # Cart (requires login; mutations ride on GET)
//! GET  /cart                   - Cart page; ?format=JSON for the raw record
//! GET  /cart/add/{id}          - Add to cart, JSON answer
//! GET  /cart/del/{id}          - Remove from cart, JSON answer
//! GET  /cart/buy-now/{id}      - Add to cart then redirect to /cart
//! GET  /cart/remove/{id}       - Remove from cart then redirect to /cart
//!
//! # Wishlist (requires login)
//! GET  /wishlist               - Wishlist page
//! GET  /wishlist/add/{id}      - Save to wishlist, JSON answer
//! GET  /wishlist/del/{id}      - Remove from wishlist, JSON answer
//!
//! # Checkout helpers
//! GET  /coupon/{code}          - Coupon check JSON
//! GET  /delivery               - Delivery estimate JSON (?country=&city=)
//!
//! # Weather widget
//! GET  /weather                - Weather snapshot JSON
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Demo login action (form: username)
//! POST /auth/logout            - Logout action
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod shop;
pub mod weather;
pub mod wishlist;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{key}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add/{id}", get(cart::add))
        .route("/del/{id}", get(cart::del))
        .route("/buy-now/{id}", get(cart::buy_now))
        .route("/remove/{id}", get(cart::remove))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add/{id}", get(wishlist::add))
        .route("/del/{id}", get(wishlist::del))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Shop page
        .route("/", get(shop::index))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Wishlist routes
        .nest("/wishlist", wishlist_routes())
        // Checkout helpers
        .route("/coupon/{code}", get(checkout::coupon_check))
        .route("/delivery", get(checkout::delivery_estimate))
        // Weather widget
        .route("/weather", get(weather::current))
        // Auth routes
        .nest("/auth", auth_routes())
}

/// Assemble the full application: routes, health endpoints, static files,
/// sessions, and request tracing.
///
/// Used by `main` and by the router-level tests.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .nest_service("/static", ServeDir::new("crates/storefront/static"))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the data directory exists before returning OK.
/// Returns 503 Service Unavailable if the flat-file stores are unusable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match tokio::fs::metadata(&state.config().data_dir).await {
        Ok(meta) if meta.is_dir() => StatusCode::OK,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}
