use std::sync::Arc;

use crate::config::Config;
use skinprice_core::{
    catalog::Catalog,
    pricing::{PriceClient, PriceService, PriceServiceTrait, ProviderConfig},
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub price_service: Arc<dyn PriceServiceTrait>,
    pub catalog: &'static Catalog,
}

impl AppState {
    pub fn new(price_service: Arc<dyn PriceServiceTrait>, catalog: &'static Catalog) -> Self {
        Self {
            price_service,
            catalog,
        }
    }
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider_config = ProviderConfig::from_env()?;
    let client =
        PriceClient::from_config(&provider_config)?.with_request_timeout(config.request_timeout);
    tracing::info!(
        "Price providers in order: {} (request deadline {}ms)",
        client.provider_ids().join(", "),
        config.request_timeout.as_millis()
    );

    let catalog = Catalog::builtin();
    tracing::info!("Catalog loaded with {} products", catalog.len());

    let price_service: Arc<dyn PriceServiceTrait> =
        Arc::new(PriceService::new(catalog, Arc::new(client)));
    Ok(Arc::new(AppState::new(price_service, catalog)))
}
