#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{body::to_bytes, body::Body, http::Request, Router};
use serde_json::Value;
use skinprice_core::{
    catalog::Catalog,
    pricing::{PriceClient, PriceService},
};
use skinprice_market_data::{
    PriceProvider, ProviderCapabilities, ProviderFailure, RawListing, SearchKey, SourceMethod,
};
use skinprice_server::{api::app_router, config::Config, AppState};
use tower::ServiceExt;

/// Provider answering every search with the same result.
pub struct StubProvider {
    pub name: &'static str,
    pub result: Result<Vec<RawListing>, ProviderFailure>,
}

#[async_trait]
impl PriceProvider for StubProvider {
    fn id(&self) -> &'static str {
        "STUB"
    }

    fn name(&self) -> &str {
        self.name
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::direct(SourceMethod::Api).with_marketplace("Stub Market")
    }

    async fn fetch_listings(&self, _key: &SearchKey) -> Result<Vec<RawListing>, ProviderFailure> {
        self.result.clone()
    }
}

/// Provider that never answers within any test's patience.
pub struct HangingProvider {
    pub name: &'static str,
}

#[async_trait]
impl PriceProvider for HangingProvider {
    fn id(&self) -> &'static str {
        "HANGING"
    }

    fn name(&self) -> &str {
        self.name
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::async_job(SourceMethod::Scrape)
    }

    async fn fetch_listings(&self, _key: &SearchKey) -> Result<Vec<RawListing>, ProviderFailure> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
}

pub fn app(providers: Vec<StubProvider>) -> Router {
    let providers = providers
        .into_iter()
        .map(|p| Arc::new(p) as Arc<dyn PriceProvider>)
        .collect();
    app_with(providers, Config::default())
}

/// Router whose price chain uses `config.request_timeout` as its deadline,
/// wired the way `build_state` wires it.
pub fn app_with(providers: Vec<Arc<dyn PriceProvider>>, config: Config) -> Router {
    let client = PriceClient::with_providers(providers, Duration::from_secs(5))
        .with_request_timeout(config.request_timeout);
    let catalog = Catalog::builtin();
    let service = Arc::new(PriceService::new(catalog, Arc::new(client)));
    let state = Arc::new(AppState::new(service, catalog));
    app_router(state, &config)
}

pub async fn get_json(app: Router, uri: &str) -> (u16, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status().as_u16();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}
