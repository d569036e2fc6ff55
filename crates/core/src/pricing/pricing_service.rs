use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use skinprice_market_data::{derive_search_key, PriceQuote, QuoteContext};

use super::client::PriceClient;
use super::pricing_traits::PriceServiceTrait;
use crate::catalog::{Catalog, Product};
use crate::errors::{Error, Result, ValidationError};

/// Catalog lookup, search key derivation and provider fallback in one call.
///
/// Holds no per-request state.
pub struct PriceService {
    catalog: &'static Catalog,
    client: Arc<PriceClient>,
}

impl PriceService {
    pub fn new(catalog: &'static Catalog, client: Arc<PriceClient>) -> Self {
        Self { catalog, client }
    }

    fn quote_context(product: &Product) -> QuoteContext {
        QuoteContext {
            item_id: product.id.clone(),
            key: derive_search_key(&product.id),
            default_name: product.name.clone(),
            default_variant: product.variant.clone(),
            default_image_url: product.image_url.clone(),
        }
    }
}

#[async_trait]
impl PriceServiceTrait for PriceService {
    async fn get_price(&self, product_id: Option<&str>) -> Result<PriceQuote> {
        let product_id = product_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ValidationError::MissingField("productId".to_string()))?;

        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| Error::NotFound(format!("Product not found: {}", product_id)))?;

        let context = Self::quote_context(product);
        debug!(
            "Pricing '{}' as '{}' (qualifier: {:?})",
            product.id, context.key.term, context.key.qualifier
        );

        self.client.fetch_price(&context).await
    }
}
