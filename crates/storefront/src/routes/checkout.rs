//! Checkout helper endpoints: coupon validation and delivery estimates.
//!
//! Both lookups run against hardcoded literal tables local to this module;
//! nothing here is persisted.

use axum::{
    Json,
    extract::{Path, Query},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};

// =============================================================================
// Coupon table
// =============================================================================

struct Coupon {
    code: &'static str,
    discount: u32,
    is_valid: bool,
}

/// Known coupon codes. Expired codes stay listed so the client can tell
/// "expired" apart from "never existed".
const COUPONS: &[Coupon] = &[
    Coupon {
        code: "SAVE10",
        discount: 10,
        is_valid: true,
    },
    Coupon {
        code: "WELCOME20",
        discount: 20,
        is_valid: false,
    },
];

/// Coupon check response.
#[derive(Debug, Serialize)]
pub struct CouponAnswer {
    pub discount: u32,
    pub is_valid: bool,
}

/// Check a coupon code.
#[instrument]
pub async fn coupon_check(Path(code): Path<String>) -> Result<Json<CouponAnswer>> {
    COUPONS
        .iter()
        .find(|coupon| coupon.code == code)
        .map(|coupon| {
            Json(CouponAnswer {
                discount: coupon.discount,
                is_valid: coupon.is_valid,
            })
        })
        .ok_or_else(|| AppError::NotFound(format!("unknown coupon code: {code}")))
}

// =============================================================================
// Delivery table
// =============================================================================

struct CityPrice {
    city: &'static str,
    price: u32,
}

struct CountryPricing {
    country: &'static str,
    cities: &'static [CityPrice],
    /// Applied when the city has no entry of its own.
    flat_price: u32,
}

const DELIVERY_PRICING: &[CountryPricing] = &[
    CountryPricing {
        country: "united-states",
        cities: &[
            CityPrice {
                city: "new-york",
                price: 90,
            },
            CityPrice {
                city: "boston",
                price: 70,
            },
        ],
        flat_price: 120,
    },
    CountryPricing {
        country: "canada",
        cities: &[CityPrice {
            city: "toronto",
            price: 80,
        }],
        flat_price: 140,
    },
];

/// Query parameters for the delivery estimate.
#[derive(Debug, Deserialize)]
pub struct DeliveryQuery {
    pub country: Option<String>,
    pub city: Option<String>,
}

/// Delivery estimate response.
#[derive(Debug, Serialize)]
pub struct DeliveryAnswer {
    pub price: u32,
}

/// Estimate the delivery price for a country/city pair.
///
/// A known country with an unknown (or missing) city gets the country's
/// flat price; an unknown country is a 404.
#[instrument]
pub async fn delivery_estimate(
    Query(query): Query<DeliveryQuery>,
) -> Result<Json<DeliveryAnswer>> {
    let country = query.country.as_deref().unwrap_or_default();

    let pricing = DELIVERY_PRICING
        .iter()
        .find(|p| p.country == country)
        .ok_or_else(|| AppError::NotFound(format!("no delivery pricing for '{country}'")))?;

    let price = query
        .city
        .as_deref()
        .and_then(|city| pricing.cities.iter().find(|c| c.city == city))
        .map_or(pricing.flat_price, |c| c.price);

    Ok(Json(DeliveryAnswer { price }))
}
