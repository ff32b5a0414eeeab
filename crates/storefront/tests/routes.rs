//! Router-level tests driven through `tower::ServiceExt`.
//!
//! Each test builds the full application (session layer included) against a
//! throwaway data directory, so the cart flow exercises the same
//! read-modify-write path as production requests.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use greengrocer_storefront::config::{StorefrontConfig, WeatherConfig};
use greengrocer_storefront::routes;
use greengrocer_storefront::state::AppState;

fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        data_dir: dir.path().to_path_buf(),
        weather: WeatherConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            api_key: None,
            latitude: 0.0,
            longitude: 0.0,
        },
    };
    let state = AppState::new(config).unwrap();
    (routes::app(state), dir)
}

async fn get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Log in as `username` and return the session cookie.
async fn login(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from(format!("username={username}")))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (app, _dir) = test_app();
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_checks_data_dir() {
    let (app, _dir) = test_app();
    let response = get(&app, "/health/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Catalog JSON
// =============================================================================

#[tokio::test]
async fn test_products_listing() {
    let (app, _dir) = test_app();
    let response = get(&app, "/products").await;
    assert_eq!(response.status(), StatusCode::OK);

    let listing = body_json(response).await;
    let products = listing.as_array().unwrap();
    assert!(!products.is_empty());
    assert_eq!(products[0]["id"], "1");
}

#[tokio::test]
async fn test_products_filter_returns_matching_subset() {
    let (app, _dir) = test_app();
    let response = get(&app, "/products?category=fruits").await;
    assert_eq!(response.status(), StatusCode::OK);

    let listing = body_json(response).await;
    let products = listing.as_array().unwrap();
    assert!(!products.is_empty());
    assert!(products.iter().all(|p| p["category"] == "fruits"));
}

#[tokio::test]
async fn test_products_sort_descending() {
    let (app, _dir) = test_app();
    let response = get(
        &app,
        "/products?category=fruits&ordering=price_after&reverse=true",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let listing = body_json(response).await;
    let prices: Vec<f64> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price_after"].as_str().unwrap().parse().unwrap())
        .collect();
    let mut sorted = prices.clone();
    sorted.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(prices, sorted);
}

#[tokio::test]
async fn test_products_unknown_ordering_is_bad_request() {
    let (app, _dir) = test_app();
    let response = get(&app, "/products?ordering=nonsense").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_by_id() {
    let (app, _dir) = test_app();

    let response = get(&app, "/products?id=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let product = body_json(response).await;
    assert_eq!(product["id"], "1");

    let response = get(&app, "/products?id=999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn test_shop_page_renders() {
    let (app, _dir) = test_app();
    let response = get(&app, "/?category=fruits").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Strawberries"));
    assert!(!html.contains("Cheddar"));
}

#[tokio::test]
async fn test_product_detail_by_slug_and_id() {
    let (app, _dir) = test_app();

    let response = get(&app, "/products/strawberries").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Strawberries"));

    let response = get(&app, "/products/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/products/no-such-product").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Checkout helpers
// =============================================================================

#[tokio::test]
async fn test_coupon_check() {
    let (app, _dir) = test_app();

    let response = get(&app, "/coupon/SAVE10").await;
    assert_eq!(response.status(), StatusCode::OK);
    let answer = body_json(response).await;
    assert_eq!(answer["discount"], 10);
    assert_eq!(answer["is_valid"], true);

    let response = get(&app, "/coupon/WELCOME20").await;
    let answer = body_json(response).await;
    assert_eq!(answer["is_valid"], false);

    let response = get(&app, "/coupon/NOPE").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delivery_estimate() {
    let (app, _dir) = test_app();

    let response = get(&app, "/delivery?country=united-states&city=new-york").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["price"], 90);

    // Unknown city falls back to the country's flat price
    let response = get(&app, "/delivery?country=united-states&city=elsewhere").await;
    assert_eq!(body_json(response).await["price"], 120);

    let response = get(&app, "/delivery?country=united-states").await;
    assert_eq!(body_json(response).await["price"], 120);

    let response = get(&app, "/delivery?country=narnia").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Weather
// =============================================================================

#[tokio::test]
async fn test_weather_unconfigured_is_503() {
    let (app, _dir) = test_app();
    let response = get(&app, "/weather").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_cart_requires_login() {
    let (app, _dir) = test_app();
    let response = get(&app, "/cart").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/auth/login"
    );
}

#[tokio::test]
async fn test_login_rejects_bad_usernames() {
    let (app, _dir) = test_app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                )
                .body(Body::from("username=not%20ok"))
                .unwrap(),
        )
        .await
        .unwrap();

    // Re-rendered login page with an error, no session cookie
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let html = body_text(response).await;
    assert!(html.contains("Usernames are"));
}

// =============================================================================
// Cart flow
// =============================================================================

#[tokio::test]
async fn test_cart_add_increment_and_remove() {
    let (app, _dir) = test_app();
    let cookie = login(&app, "alice").await;

    // Adding twice increments the quantity
    let response = get_with_cookie(&app, "/cart/add/1", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_with_cookie(&app, "/cart/add/1", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_with_cookie(&app, "/cart?format=JSON", &cookie).await;
    let record = body_json(response).await;
    assert_eq!(record["products"]["1"], 2);

    // Unknown product ids are rejected
    let response = get_with_cookie(&app, "/cart/add/999", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Removing an id that is not in the cart fails
    let response = get_with_cookie(&app, "/cart/del/2", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Removal deletes the key entirely
    let response = get_with_cookie(&app, "/cart/del/1", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_with_cookie(&app, "/cart?format=JSON", &cookie).await;
    let record = body_json(response).await;
    assert!(record["products"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_cart_page_shows_line_totals() {
    let (app, _dir) = test_app();
    let cookie = login(&app, "alice").await;

    // Product 1 is $4.00 after discount
    get_with_cookie(&app, "/cart/add/1", &cookie).await;
    get_with_cookie(&app, "/cart/add/1", &cookie).await;

    let response = get_with_cookie(&app, "/cart", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Strawberries"));
    assert!(html.contains("$8.00"));
}

#[tokio::test]
async fn test_buy_now_redirects_to_cart() {
    let (app, _dir) = test_app();
    let cookie = login(&app, "alice").await;

    let response = get_with_cookie(&app, "/cart/buy-now/2", &cookie).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/cart");

    let response = get_with_cookie(&app, "/cart?format=JSON", &cookie).await;
    let record = body_json(response).await;
    assert_eq!(record["products"]["2"], 1);
}

#[tokio::test]
async fn test_carts_are_per_user() {
    let (app, _dir) = test_app();
    let alice = login(&app, "alice").await;
    let bob = login(&app, "bob").await;

    get_with_cookie(&app, "/cart/add/1", &alice).await;

    let response = get_with_cookie(&app, "/cart?format=JSON", &bob).await;
    let record = body_json(response).await;
    assert!(record["products"].as_object().unwrap().is_empty());
}

// =============================================================================
// Wishlist flow
// =============================================================================

#[tokio::test]
async fn test_wishlist_add_and_remove() {
    let (app, _dir) = test_app();
    let cookie = login(&app, "alice").await;

    // Saving twice keeps a single entry
    let response = get_with_cookie(&app, "/wishlist/add/3", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = get_with_cookie(&app, "/wishlist/add/3", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_with_cookie(&app, "/wishlist", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Bananas"));
    // One card, so exactly one remove link
    assert_eq!(html.matches("/wishlist/del/3").count(), 1);

    // Unknown ids rejected, absent removals fail
    let response = get_with_cookie(&app, "/wishlist/add/999", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get_with_cookie(&app, "/wishlist/del/1", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_with_cookie(&app, "/wishlist/del/3", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
}
