//! Price client - facade for the market-data crate.
//!
//! Builds the configured providers once and owns the registry that walks
//! them.
//!
//! ```text
//! ProviderConfig ──build──▶ [PriceProvider...] ──▶ ProviderRegistry
//!                                                        │
//!                QuoteContext ──fetch_price──────────────┴──▶ PriceQuote
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};

use skinprice_market_data::{
    ApifyActorProvider, CsFloatProvider, PriceProvider, PriceQuote, ProviderRegistry,
    QuoteContext, SteamMarketProvider, WebScraperProvider, BUFF163, STEAMDT,
};

use super::config::{ProviderConfig, ProviderSelector};
use crate::errors::{ConfigError, Result};

/// Price client - owns the provider chain.
pub struct PriceClient {
    registry: ProviderRegistry,
}

impl PriceClient {
    /// Build every selected provider from configuration.
    ///
    /// Providers are tried in the order they were selected.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        let mut providers: Vec<Arc<dyn PriceProvider>> = Vec::with_capacity(config.providers.len());
        let mut custom_priorities: HashMap<String, i32> = HashMap::new();

        for (rank, selector) in config.providers.iter().enumerate() {
            let provider = Self::create_provider(*selector, config)?;
            custom_priorities.insert(provider.id().to_string(), rank as i32);
            providers.push(provider);
        }

        info!(
            "Price client initialized with {} providers: {:?}",
            providers.len(),
            providers.iter().map(|p| p.id()).collect::<Vec<_>>()
        );

        let registry = ProviderRegistry::with_priorities(providers, custom_priorities)
            .with_attempt_timeout(config.attempt_timeout);
        Ok(Self { registry })
    }

    /// Use prebuilt providers, ordered by their own priority.
    pub fn with_providers(providers: Vec<Arc<dyn PriceProvider>>, attempt_timeout: Duration) -> Self {
        Self {
            registry: ProviderRegistry::new(providers).with_attempt_timeout(attempt_timeout),
        }
    }

    /// Bound each `fetch_price` call as a whole, all provider attempts
    /// included.
    pub fn with_request_timeout(self, request_timeout: Duration) -> Self {
        Self {
            registry: self.registry.with_request_timeout(request_timeout),
        }
    }

    fn create_provider(
        selector: ProviderSelector,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn PriceProvider>> {
        let credential = |value: &Option<String>| {
            value.clone().ok_or_else(|| ConfigError::MissingCredential {
                provider: selector.to_string(),
                variable: selector.credential_var().unwrap_or_default(),
            })
        };

        let provider: Arc<dyn PriceProvider> = match selector {
            ProviderSelector::CsFloat => {
                Arc::new(CsFloatProvider::new(credential(&config.csfloat_api_key)?))
            }
            ProviderSelector::Apify => Arc::new(ApifyActorProvider::new(
                credential(&config.apify_token)?,
                config.apify_actor_id.clone(),
            )),
            ProviderSelector::Buff163 => Arc::new(WebScraperProvider::new(
                credential(&config.apify_token)?,
                BUFF163,
                config.poll_policy(),
            )),
            ProviderSelector::SteamDt => Arc::new(WebScraperProvider::new(
                credential(&config.apify_token)?,
                STEAMDT,
                config.poll_policy(),
            )),
            ProviderSelector::Steam => Arc::new(SteamMarketProvider::new()),
        };

        debug!("Created provider {} for '{}'", provider.id(), selector);
        Ok(provider)
    }

    /// Provider ids in the order they are tried.
    pub fn provider_ids(&self) -> Vec<&'static str> {
        self.registry.providers().iter().map(|p| p.id()).collect()
    }

    /// Fetch a reconciled quote through the fallback chain.
    pub async fn fetch_price(&self, context: &QuoteContext) -> Result<PriceQuote> {
        Ok(self.registry.fetch_price(context).await?)
    }
}
