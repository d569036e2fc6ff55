//! Read-only catalog lookups.
//!
//! The curated item list is compiled in from `products.json` and parsed once.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::catalog_model::{Product, ProductPage, ProductQuery};

lazy_static! {
    static ref BUILTIN: Catalog = Catalog::load();
}

/// Immutable item catalog with id lookup.
#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        let by_id = products
            .iter()
            .enumerate()
            .map(|(index, product)| (product.id.clone(), index))
            .collect();
        Self { products, by_id }
    }

    /// The compiled-in catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    fn load() -> Self {
        let json = include_str!("products.json");
        let products: Vec<Product> =
            serde_json::from_str(json).expect("products.json must be valid");
        Self::new(products)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).map(|index| &self.products[*index])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Filter, then paginate. `total` counts matches before pagination.
    pub fn search(&self, query: &ProductQuery) -> ProductPage {
        let needle = query.query.as_deref().map(str::to_lowercase);
        let category = query.category.as_deref().map(str::to_lowercase);

        let matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| needle.as_deref().map_or(true, |n| matches_text(p, n)))
            .filter(|p| {
                category
                    .as_deref()
                    .map_or(true, |c| p.category.to_lowercase() == c)
            })
            .collect();

        let total = matches.len();
        let products = matches
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect();

        ProductPage {
            products,
            total,
            has_more: query.offset.saturating_add(query.limit) < total,
        }
    }
}

fn matches_text(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product.id.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
        || product
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}
