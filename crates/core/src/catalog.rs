//! Catalog access seam.
//!
//! Production catalogs live behind an external service; the core only needs
//! list/find. `InMemoryCatalog` ships a small seed set for the server's
//! catalog endpoint, demos, and tests.

use rust_decimal_macros::dec;

use crate::domain::product::{Category, Product, ProductId, StorePrices};

pub trait CatalogSource: Send + Sync {
    fn list(&self) -> Vec<Product>;
    fn find(&self, product_id: &ProductId) -> Option<Product>;
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn with_seed_data() -> Self {
        Self::new(seed_products())
    }
}

impl CatalogSource for InMemoryCatalog {
    fn list(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn find(&self, product_id: &ProductId) -> Option<Product> {
        self.products.iter().find(|product| &product.id == product_id).cloned()
    }
}

fn product(
    id: &str,
    name: &str,
    unit: &str,
    category: &str,
    prices: StorePrices,
) -> Product {
    Product {
        id: ProductId(id.to_string()),
        name: name.to_string(),
        unit: unit.to_string(),
        category: Some(Category { name: category.to_string() }),
        image_url: None,
        prices,
    }
}

fn seed_products() -> Vec<Product> {
    vec![
        product(
            "bananas-lb",
            "Bananas",
            "per lb",
            "Fruits",
            StorePrices {
                walmart: dec!(0.58),
                heb: dec!(0.54),
                aldi: dec!(0.49),
                target: dec!(0.69),
                kroger: dec!(0.59),
                sams: dec!(0.56),
            },
        ),
        product(
            "whole-milk-gal",
            "Whole Milk",
            "1 gallon",
            "Dairy",
            StorePrices {
                walmart: dec!(3.18),
                heb: dec!(3.42),
                aldi: dec!(3.05),
                target: dec!(3.59),
                kroger: dec!(3.29),
                sams: dec!(2.98),
            },
        ),
        product(
            "large-eggs-dozen",
            "Large Eggs",
            "12 count",
            "Dairy",
            StorePrices {
                walmart: dec!(2.72),
                heb: dec!(2.90),
                aldi: dec!(2.45),
                target: dec!(3.19),
                kroger: dec!(2.99),
                sams: dec!(2.58),
            },
        ),
        product(
            "organic-spinach",
            "Organic Baby Spinach",
            "5 oz",
            "Produce",
            StorePrices {
                walmart: dec!(2.98),
                heb: dec!(2.76),
                aldi: dec!(2.49),
                target: dec!(3.29),
                kroger: dec!(2.99),
                sams: dec!(0),
            },
        ),
        product(
            "chicken-breast-lb",
            "Chicken Breast",
            "per lb",
            "Meat",
            StorePrices {
                walmart: dec!(3.43),
                heb: dec!(3.11),
                aldi: dec!(3.29),
                target: dec!(4.19),
                kroger: dec!(3.49),
                sams: dec!(2.92),
            },
        ),
        product(
            "sourdough-loaf",
            "Sourdough Bread",
            "24 oz loaf",
            "Bakery",
            StorePrices {
                walmart: dec!(3.97),
                heb: dec!(4.25),
                aldi: dec!(3.65),
                target: dec!(4.49),
                kroger: dec!(4.19),
                sams: dec!(0),
            },
        ),
        product(
            "roma-tomatoes-lb",
            "Roma Tomatoes",
            "per lb",
            "Vegetables",
            StorePrices {
                walmart: dec!(1.28),
                heb: dec!(1.18),
                aldi: dec!(1.09),
                target: dec!(1.49),
                kroger: dec!(1.29),
                sams: dec!(1.15),
            },
        ),
        product(
            "tortilla-chips",
            "Tortilla Chips",
            "13 oz bag",
            "Snacks",
            StorePrices {
                walmart: dec!(2.48),
                heb: dec!(2.35),
                aldi: dec!(1.99),
                target: dec!(2.99),
                kroger: dec!(2.79),
                sams: dec!(4.98),
            },
        ),
    ]
}
