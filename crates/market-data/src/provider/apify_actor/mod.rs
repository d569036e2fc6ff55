//! Apify actor provider.
//!
//! Runs a marketplace scraping actor synchronously and reads the listings
//! from the run output. Actor output formats differ, so listings are found
//! under `data.items`, `items`, `data` or the body itself, and each field is
//! extracted defensively.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::ProviderFailure;
use crate::models::{RawListing, SearchKey, SourceMethod, USD};
use crate::provider::http::{build_client, read_json, transport_failure, DEFAULT_REQUEST_TIMEOUT};
use crate::provider::{PriceProvider, ProviderCapabilities};
use crate::reconciler::extract::{self, keys};

pub const APIFY_BASE_URL: &str = "https://api.apify.com";
pub const DEFAULT_ACTOR_ID: &str = "buff163-market-scraper";

const PROVIDER_ID: &str = "APIFY";
const PROVIDER_NAME: &str = "Apify";
const MARKETPLACE: &str = "Buff163 (via Apify)";

/// Listings per actor run.
const RESULT_LIMIT: u32 = 20;

const LISTING_PATHS: &[&[&str]] = &[&["data", "items"], &["items"], &["data"], &[]];

/// Provider backed by a synchronous Apify actor run. Requires a token.
pub struct ApifyActorProvider {
    client: Client,
    token: String,
    actor_id: String,
    base_url: String,
}

impl ApifyActorProvider {
    pub fn new(token: String, actor_id: impl Into<String>) -> Self {
        Self::with_base_url(token, actor_id, APIFY_BASE_URL)
    }

    pub fn with_base_url(
        token: String,
        actor_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: build_client(DEFAULT_REQUEST_TIMEOUT),
            token,
            // Apify addresses `user/actor` as `user~actor` in paths
            actor_id: actor_id.into().replace('/', "~"),
            base_url: base_url.into(),
        }
    }

    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    fn parse_listings(payload: &Value) -> Vec<RawListing> {
        extract::first_array(payload, LISTING_PATHS)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| record.is_object())
                    .map(|record| extract::listing_from_record(record, keys::PRICE, USD))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl PriceProvider for ApifyActorProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn priority(&self) -> u8 {
        2
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::direct(SourceMethod::Scrape)
            .with_marketplace(MARKETPLACE)
            .with_credential()
    }

    async fn fetch_listings(&self, key: &SearchKey) -> Result<Vec<RawListing>, ProviderFailure> {
        let url = format!("{}/v2/acts/{}/run-sync", self.base_url, self.actor_id);
        debug!("Apify actor run: {} for '{}'", self.actor_id, key.term);

        let mut body = json!({ "searchTerm": key.term, "limit": RESULT_LIMIT });
        if let Some(wear) = key.qualifier {
            body["wear"] = json!(wear.display_name());
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_failure(PROVIDER_NAME, &e))?;

        let payload = read_json(PROVIDER_NAME, response).await?;
        let listings = Self::parse_listings(&payload);
        if listings.is_empty() {
            return Err(ProviderFailure::empty(
                PROVIDER_NAME,
                format!(
                    "Actor \"{}\" returned no listings for: {}",
                    self.actor_id, key.term
                ),
            ));
        }

        Ok(listings)
    }
}
