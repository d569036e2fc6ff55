//! Web scraper provider.
//!
//! Scrapes a marketplace search page through Apify's generic web-scraper
//! actor. The run is asynchronous: submit it, poll its status on a fixed
//! interval, then read the dataset it produced. Which page is scraped and
//! how it is read comes from a [`ScrapeTarget`].

mod poller;
mod targets;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::ProviderFailure;
use crate::models::{RawListing, SearchKey, SourceMethod};
use crate::provider::apify_actor::APIFY_BASE_URL;
use crate::provider::clock::{Clock, TokioClock};
use crate::provider::http::{build_client, read_json, transport_failure, DEFAULT_REQUEST_TIMEOUT};
use crate::provider::{PriceProvider, ProviderCapabilities};
use crate::reconciler::extract;

pub use poller::{PollPolicy, PollState, RunStatus};
pub use targets::{ScrapeTarget, BUFF163, CNY_PER_USD, STEAMDT};

const WEB_SCRAPER_ACTOR: &str = "apify~web-scraper";

/// Milliseconds the actor waits for the page before running the page function.
const PAGE_WAIT_MS: u64 = 3000;

const DATASET_PATHS: &[&[&str]] = &[&[], &["items"], &["data", "items"]];

/// Async-job provider scraping one marketplace. Requires an Apify token.
pub struct WebScraperProvider {
    client: Client,
    token: String,
    target: ScrapeTarget,
    policy: PollPolicy,
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl WebScraperProvider {
    pub fn new(token: String, target: ScrapeTarget, policy: PollPolicy) -> Self {
        Self::with_base_url(token, target, policy, APIFY_BASE_URL)
    }

    pub fn with_base_url(
        token: String,
        target: ScrapeTarget,
        policy: PollPolicy,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: build_client(DEFAULT_REQUEST_TIMEOUT),
            token,
            target,
            policy,
            base_url: base_url.into(),
            clock: Arc::new(TokioClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn target(&self) -> &ScrapeTarget {
        &self.target
    }

    async fn get_json(&self, url: &str) -> Result<Value, ProviderFailure> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| transport_failure(self.target.name, &e))?;
        read_json(self.target.name, response).await
    }

    async fn submit(&self, key: &SearchKey) -> Result<String, ProviderFailure> {
        let url = format!("{}/v2/acts/{}/runs", self.base_url, WEB_SCRAPER_ACTOR);
        let start_url = self.target.start_url(&key.term);
        debug!("{} scrape submit: {}", self.target.name, start_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({
                "startUrls": [{ "url": start_url }],
                "waitFor": PAGE_WAIT_MS,
                "pageFunction": self.target.page_function,
            }))
            .send()
            .await
            .map_err(|e| transport_failure(self.target.name, &e))?;

        let payload = read_json(self.target.name, response).await?;
        payload
            .pointer("/data/id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ProviderFailure::malformed(self.target.name, "run submission returned no id"))
    }

    /// Poll a submitted run until it settles. Returns the dataset id.
    async fn await_run(&self, run_id: String) -> Result<String, ProviderFailure> {
        let mut state = PollState::submitted(run_id);

        while let Some(run_id) = state.pending_run() {
            self.clock.sleep(self.policy.interval).await;

            let url = format!("{}/v2/actor-runs/{}", self.base_url, run_id);
            let payload = self.get_json(&url).await?;
            let status = RunStatus::from_payload(&payload)
                .map_err(|detail| ProviderFailure::malformed(self.target.name, detail))?;

            debug!("{} run {}: {:?}", self.target.name, run_id, status);
            state = state.observe(status, &self.policy);
        }

        match state {
            PollState::Succeeded { dataset_id } => Ok(dataset_id),
            PollState::Failed { status } => Err(ProviderFailure::unknown(
                self.target.name,
                format!("scrape run failed: {}", status),
            )),
            PollState::Aborted => Err(ProviderFailure::unknown(
                self.target.name,
                "scrape run aborted",
            )),
            PollState::TimedOut { attempts } => {
                warn!(
                    "{} scrape still pending after {} polls",
                    self.target.name, attempts
                );
                Err(ProviderFailure::timeout(
                    self.target.name,
                    format!("scrape run still pending after {} polls", attempts),
                ))
            }
            PollState::Submitted { .. } | PollState::Polling { .. } => Err(
                ProviderFailure::unknown(self.target.name, "scrape run left unsettled"),
            ),
        }
    }

    fn parse_dataset(&self, payload: &Value) -> Vec<RawListing> {
        let Some(records) = extract::first_array(payload, DATASET_PATHS) else {
            return Vec::new();
        };

        extract::flatten_records(records)
            .into_iter()
            .map(|record| {
                let listing =
                    extract::listing_from_record(record, self.target.price_keys, self.target.currency);
                match self.target.units_per_usd {
                    Some(rate) => listing.convert_to_usd(rate),
                    None => listing,
                }
            })
            .collect()
    }
}

#[async_trait]
impl PriceProvider for WebScraperProvider {
    fn id(&self) -> &'static str {
        self.target.id
    }

    fn name(&self) -> &str {
        self.target.name
    }

    fn priority(&self) -> u8 {
        self.target.priority
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::async_job(SourceMethod::Scrape)
            .with_marketplace(self.target.marketplace)
            .with_native_currency(self.target.currency)
            .with_credential()
    }

    async fn fetch_listings(&self, key: &SearchKey) -> Result<Vec<RawListing>, ProviderFailure> {
        let run_id = self.submit(key).await?;
        let dataset_id = self.await_run(run_id).await?;

        let url = format!("{}/v2/datasets/{}/items", self.base_url, dataset_id);
        let payload = self.get_json(&url).await?;
        let listings = self.parse_dataset(&payload);
        if listings.is_empty() {
            return Err(ProviderFailure::empty(
                self.target.name,
                format!("No items found in dataset for: {}", key.term),
            ));
        }

        Ok(listings)
    }
}
