//! Steam Community Market provider.
//!
//! Uses the public `priceoverview` endpoint (no credential). The endpoint
//! answers with formatted price strings for one exact market name, so the
//! search key's wear is part of the query and the result is a single listing.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::ProviderFailure;
use crate::models::{PriceUnit, RawListing, SearchKey, SourceMethod, USD};
use crate::provider::http::{build_client, read_json, transport_failure, DEFAULT_REQUEST_TIMEOUT};
use crate::provider::{PriceProvider, ProviderCapabilities};
use crate::reconciler::extract;

const BASE_URL: &str = "https://steamcommunity.com";
const PROVIDER_ID: &str = "STEAM";
const PROVIDER_NAME: &str = "Steam";
const MARKETPLACE: &str = "Steam Community Market";

/// Steam application id of Counter-Strike 2.
const CS2_APP_ID: &str = "730";
/// Steam wallet currency code for USD.
const STEAM_CURRENCY_USD: &str = "1";

/// Response from /market/priceoverview
#[derive(Debug, Deserialize)]
struct PriceOverview {
    success: bool,
    /// e.g. "$1,234.56"
    lowest_price: Option<String>,
    median_price: Option<String>,
    // Note: volume exists but sample size is one quote
}

/// Steam Community Market price overview provider.
pub struct SteamMarketProvider {
    client: Client,
    base_url: String,
}

impl Default for SteamMarketProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SteamMarketProvider {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(DEFAULT_REQUEST_TIMEOUT),
            base_url: base_url.into(),
        }
    }

    fn to_listing(overview: PriceOverview, key: &SearchKey) -> Result<RawListing, ProviderFailure> {
        let market_name = key.market_hash_name();
        if !overview.success {
            return Err(ProviderFailure::empty(
                PROVIDER_NAME,
                format!("success=false for: {}", market_name),
            ));
        }

        let text = overview
            .median_price
            .or(overview.lowest_price)
            .ok_or_else(|| {
                ProviderFailure::empty(PROVIDER_NAME, format!("no price for: {}", market_name))
            })?;

        let amount = extract::parse_price_text(&text).ok_or_else(|| {
            ProviderFailure::malformed(PROVIDER_NAME, format!("Could not parse price: {}", text))
        })?;

        let mut listing = RawListing::new(Some(amount), PriceUnit::Major, USD).with_name(market_name);
        if let Some(wear) = key.qualifier {
            listing = listing.with_wear(wear.display_name());
        }
        Ok(listing)
    }
}

#[async_trait]
impl PriceProvider for SteamMarketProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn priority(&self) -> u8 {
        5
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::direct(SourceMethod::Api).with_marketplace(MARKETPLACE)
    }

    async fn fetch_listings(&self, key: &SearchKey) -> Result<Vec<RawListing>, ProviderFailure> {
        let url = format!("{}/market/priceoverview/", self.base_url);
        let market_name = key.market_hash_name();
        debug!("Steam request: {} for '{}'", url, market_name);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[
                ("appid", CS2_APP_ID),
                ("currency", STEAM_CURRENCY_USD),
                ("market_hash_name", market_name.as_str()),
            ])
            .send()
            .await
            .map_err(|e| transport_failure(PROVIDER_NAME, &e))?;

        let payload = read_json(PROVIDER_NAME, response).await?;
        let overview: PriceOverview = serde_json::from_value(payload).map_err(|e| {
            ProviderFailure::malformed(PROVIDER_NAME, format!("unexpected response: {}", e))
        })?;

        Ok(vec![Self::to_listing(overview, key)?])
    }
}
