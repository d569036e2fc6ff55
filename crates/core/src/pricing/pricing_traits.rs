use async_trait::async_trait;

use skinprice_market_data::PriceQuote;

use crate::errors::Result;

/// Resolves catalog items into live market quotes.
#[async_trait]
pub trait PriceServiceTrait: Send + Sync {
    /// Price one catalog item.
    ///
    /// Fails with a validation error when `product_id` is missing or blank,
    /// `NotFound` when it names no catalog item, and a market data error when
    /// every provider failed.
    async fn get_price(&self, product_id: Option<&str>) -> Result<PriceQuote>;
}
