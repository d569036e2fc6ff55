//! Curated item catalog.

mod catalog_model;
mod catalog_service;

pub use catalog_model::{Product, ProductPage, ProductQuery, DEFAULT_PAGE_LIMIT};
pub use catalog_service::Catalog;
