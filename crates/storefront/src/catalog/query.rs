//! Catalog filtering and sorting.
//!
//! Linear scans over the static table: an optional equality filter on the
//! category field, an optional stable sort on a named field, and a bounded
//! same-category sample for product pages.

use std::cmp::Ordering;
use std::str::FromStr;

use rand::seq::SliceRandom;
use serde::Deserialize;
use thiserror::Error;

use super::{Catalog, Product};

/// Maximum number of related products shown on a product page.
const RELATED_LIMIT: usize = 4;

/// Error for an `ordering` value naming no sortable field.
#[derive(Debug, Error)]
#[error("unknown ordering key: {0}")]
pub struct UnknownSortKey(String);

/// Sortable catalog fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    PriceBefore,
    PriceAfter,
    Rating,
    Review,
    SoldValue,
    WeightInStock,
}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price_before" => Ok(Self::PriceBefore),
            "price_after" => Ok(Self::PriceAfter),
            "rating" => Ok(Self::Rating),
            "review" => Ok(Self::Review),
            "sold_value" => Ok(Self::SoldValue),
            "weight_in_stock" => Ok(Self::WeightInStock),
            other => Err(UnknownSortKey(other.to_owned())),
        }
    }
}

impl SortKey {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::PriceBefore => a.price_before.cmp(&b.price_before),
            Self::PriceAfter => a.price_after.cmp(&b.price_after),
            Self::Rating => a.rating.total_cmp(&b.rating),
            Self::Review => a.review.cmp(&b.review),
            Self::SoldValue => a.sold_value.cmp(&b.sold_value),
            Self::WeightInStock => a.weight_in_stock.cmp(&b.weight_in_stock),
        }
    }
}

/// Filter/sort parameters, as they arrive in a query string.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub ordering: Option<String>,
    pub reverse: Option<String>,
}

impl CatalogQuery {
    /// Whether the `reverse` flag asks for a descending sort.
    #[must_use]
    pub fn is_descending(&self) -> bool {
        self.reverse
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// All products matching the optional category filter, in ascending id order.
///
/// The backing table is a hash map; ordering by numeric id keeps the listing
/// deterministic.
#[must_use]
pub fn filter_by_category<'a>(catalog: &'a Catalog, category: Option<&str>) -> Vec<&'a Product> {
    let mut products: Vec<&Product> = match category {
        Some(wanted) => catalog.products().filter(|p| p.category == wanted).collect(),
        None => catalog.products().collect(),
    };
    products.sort_by(|a, b| id_order(a).cmp(&id_order(b)));
    products
}

/// Stable sort by the given key and direction.
///
/// Descending order reverses the comparator, not the result, so products
/// with equal keys keep their relative order either way.
pub fn sort_products(products: &mut [&Product], key: SortKey, descending: bool) {
    products.sort_by(|a, b| {
        let ordering = key.compare(a, b);
        if descending { ordering.reverse() } else { ordering }
    });
}

/// Apply a [`CatalogQuery`] to the catalog.
///
/// # Errors
///
/// Returns [`UnknownSortKey`] if `ordering` names no sortable field.
pub fn select<'a>(
    catalog: &'a Catalog,
    query: &CatalogQuery,
) -> Result<Vec<&'a Product>, UnknownSortKey> {
    let mut products = filter_by_category(catalog, query.category.as_deref());
    if let Some(ordering) = query.ordering.as_deref() {
        let key = SortKey::from_str(ordering)?;
        sort_products(&mut products, key, query.is_descending());
    }
    Ok(products)
}

/// Up to four products sharing `current`'s category, excluding `current`,
/// in shuffled order.
#[must_use]
pub fn related_products<'a>(catalog: &'a Catalog, current: &Product) -> Vec<&'a Product> {
    let mut related: Vec<&Product> = catalog
        .products()
        .filter(|p| p.category == current.category && p.id != current.id)
        .collect();
    related.shuffle(&mut rand::rng());
    related.truncate(RELATED_LIMIT);
    related
}

fn id_order(product: &Product) -> (u64, &str) {
    let id = product.id.as_str();
    (id.parse().unwrap_or(u64::MAX), id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use greengrocer_core::{Price, ProductId};

    fn test_product(id: &str, category: &str, price_cents: u32, rating: f32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            category: category.to_owned(),
            discount: None,
            price_before: Price::from_cents(price_cents),
            price_after: Price::from_cents(price_cents),
            rating,
            review: 0,
            sold_value: 0,
            weight_in_stock: 0,
            image: String::new(),
            slug: format!("product-{id}"),
        }
    }

    fn test_catalog() -> Catalog {
        Catalog::new(vec![
            test_product("1", "fruits", 500, 5.0),
            test_product("2", "fruits", 130, 4.7),
            test_product("3", "vegetables", 250, 4.6),
            test_product("4", "fruits", 130, 4.9),
            test_product("5", "dairy", 320, 4.8),
        ])
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_filter_returns_matching_subset() {
        let catalog = test_catalog();
        let fruits = filter_by_category(&catalog, Some("fruits"));
        assert_eq!(fruits.len(), 3);
        assert!(fruits.iter().all(|p| p.category == "fruits"));
    }

    #[test]
    fn test_no_filter_returns_everything_in_id_order() {
        let catalog = test_catalog();
        let all = filter_by_category(&catalog, None);
        assert_eq!(ids(&all), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let catalog = test_catalog();
        assert!(filter_by_category(&catalog, Some("frozen")).is_empty());
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let catalog = test_catalog();
        let mut fruits = filter_by_category(&catalog, Some("fruits"));

        sort_products(&mut fruits, SortKey::PriceAfter, false);
        assert_eq!(ids(&fruits), ["2", "4", "1"]);

        sort_products(&mut fruits, SortKey::PriceAfter, true);
        assert_eq!(ids(&fruits), ["1", "2", "4"]);
    }

    #[test]
    fn test_sort_is_stable_per_direction() {
        let catalog = test_catalog();

        // Products 2 and 4 share a price; their id order must survive the
        // sort in both directions.
        let mut fruits = filter_by_category(&catalog, Some("fruits"));
        sort_products(&mut fruits, SortKey::PriceAfter, false);
        assert_eq!(ids(&fruits), ["2", "4", "1"]);

        let mut fruits = filter_by_category(&catalog, Some("fruits"));
        sort_products(&mut fruits, SortKey::PriceAfter, true);
        assert_eq!(ids(&fruits), ["1", "2", "4"]);
    }

    #[test]
    fn test_sort_by_rating() {
        let catalog = test_catalog();
        let mut all = filter_by_category(&catalog, None);
        sort_products(&mut all, SortKey::Rating, true);
        assert_eq!(ids(&all).first().map(String::as_str), Some("1"));
    }

    #[test]
    fn test_select_rejects_unknown_ordering() {
        let catalog = test_catalog();
        let query = CatalogQuery {
            category: None,
            ordering: Some("password".to_owned()),
            reverse: None,
        };
        assert!(select(&catalog, &query).is_err());
    }

    #[test]
    fn test_select_combines_filter_and_sort() {
        let catalog = test_catalog();
        let query = CatalogQuery {
            category: Some("fruits".to_owned()),
            ordering: Some("price_after".to_owned()),
            reverse: Some("True".to_owned()),
        };
        let selection = select(&catalog, &query).unwrap();
        assert_eq!(ids(&selection), ["1", "2", "4"]);
    }

    #[test]
    fn test_related_products_bounded_and_exclude_self() {
        let catalog = Catalog::new(
            (1..=8)
                .map(|i| test_product(&i.to_string(), "fruits", 100, 4.0))
                .collect(),
        );
        let current = test_product("1", "fruits", 100, 4.0);
        let related = related_products(&catalog, &current);

        assert_eq!(related.len(), 4);
        assert!(related.iter().all(|p| p.id != current.id));
        assert!(related.iter().all(|p| p.category == "fruits"));
    }

    #[test]
    fn test_related_products_ignore_other_categories() {
        let catalog = test_catalog();
        let current = test_product("5", "dairy", 320, 4.8);
        assert!(related_products(&catalog, &current).is_empty());
    }
}
