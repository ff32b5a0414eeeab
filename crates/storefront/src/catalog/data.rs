//! Builtin catalog seed data.

use greengrocer_core::{Price, ProductId};

use super::Product;

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: &str,
    description: &str,
    discount: Option<u32>,
    price_before_cents: u32,
    price_after_cents: u32,
    rating: f32,
    review: u32,
    sold_value: u32,
    weight_in_stock: u32,
    slug: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        category: category.to_owned(),
        discount,
        price_before: Price::from_cents(price_before_cents),
        price_after: Price::from_cents(price_after_cents),
        rating,
        review,
        sold_value,
        weight_in_stock,
        image: format!("/static/images/product-{id}.jpg"),
        slug: slug.to_owned(),
    }
}

/// The builtin product table.
pub(super) fn seed() -> Vec<Product> {
    vec![
        product(
            "1",
            "Strawberries",
            "fruits",
            "Sweet and fragrant strawberries, full of vitamins to brighten your day.",
            Some(20),
            500,
            400,
            5.0,
            200,
            700,
            400,
            "strawberries",
        ),
        product(
            "2",
            "Apples",
            "fruits",
            "Juicy and sweet apples - the perfect snack for a healthy break.",
            None,
            130,
            130,
            4.7,
            30,
            70,
            200,
            "apples",
        ),
        product(
            "3",
            "Bananas",
            "fruits",
            "Ripe bananas, rich in potassium and ready for breakfast or baking.",
            None,
            90,
            90,
            4.5,
            55,
            320,
            260,
            "bananas",
        ),
        product(
            "4",
            "Blueberries",
            "fruits",
            "Plump blueberries picked at peak season, great on porridge or straight from the punnet.",
            Some(20),
            640,
            512,
            4.9,
            112,
            280,
            90,
            "blueberries",
        ),
        product(
            "5",
            "Tomatoes",
            "vegetables",
            "Vine-ripened tomatoes with a deep summer flavour.",
            None,
            250,
            250,
            4.6,
            41,
            190,
            310,
            "tomatoes",
        ),
        product(
            "6",
            "Cucumbers",
            "vegetables",
            "Crisp cucumbers, perfect for salads and pickling.",
            Some(15),
            200,
            170,
            4.3,
            18,
            95,
            150,
            "cucumbers",
        ),
        product(
            "7",
            "Carrots",
            "vegetables",
            "Crunchy carrots, sweet enough to eat raw.",
            None,
            120,
            120,
            4.4,
            26,
            140,
            380,
            "carrots",
        ),
        product(
            "8",
            "Whole Milk",
            "dairy",
            "Fresh whole milk from a local dairy, bottled daily.",
            Some(25),
            320,
            240,
            4.8,
            74,
            520,
            230,
            "whole-milk",
        ),
        product(
            "9",
            "Greek Yogurt",
            "dairy",
            "Thick strained yogurt with a clean, tangy finish.",
            None,
            480,
            480,
            4.6,
            63,
            210,
            120,
            "greek-yogurt",
        ),
        product(
            "10",
            "Cheddar",
            "dairy",
            "Twelve-month matured cheddar with a proper bite.",
            None,
            790,
            790,
            4.9,
            88,
            160,
            75,
            "cheddar",
        ),
        product(
            "11",
            "Sourdough Loaf",
            "bakery",
            "Slow-fermented sourdough with a dark, crackly crust.",
            None,
            650,
            650,
            4.8,
            97,
            340,
            60,
            "sourdough-loaf",
        ),
        product(
            "12",
            "Butter Croissant",
            "bakery",
            "Laminated all-butter croissant, baked every morning.",
            None,
            220,
            220,
            4.7,
            120,
            610,
            85,
            "butter-croissant",
        ),
    ]
}
