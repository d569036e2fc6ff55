//! CSFloat market provider.
//!
//! Queries the CSFloat listings API by market name. Prices come back as
//! integer US cents; item metadata is nested under `item`.
//!
//! API documentation: https://docs.csfloat.com/

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::errors::ProviderFailure;
use crate::models::{PriceUnit, RawListing, SearchKey, SourceMethod, USD};
use crate::provider::http::{build_client, read_json, transport_failure, DEFAULT_REQUEST_TIMEOUT};
use crate::provider::{PriceProvider, ProviderCapabilities};
use crate::reconciler::extract::{self, keys};

const BASE_URL: &str = "https://csfloat.com";
const PROVIDER_ID: &str = "CSFLOAT";
const PROVIDER_NAME: &str = "CSFloat";
const MARKETPLACE: &str = "CSFloat Market";

/// Listings arrive as a bare array or wrapped in `data`.
const LISTING_PATHS: &[&[&str]] = &[&[], &["data"]];

/// Largest page the listings endpoint serves.
const PAGE_LIMIT: &str = "50";

/// CDN prefix for the relative `icon_url` paths CSFloat returns.
pub const STEAM_IMAGE_CDN: &str = "https://steamcommunity-a.akamaihd.net/economy/image/";

/// CSFloat listings provider. Requires an API key.
pub struct CsFloatProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CsFloatProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(DEFAULT_REQUEST_TIMEOUT),
            api_key,
            base_url: base_url.into(),
        }
    }

    fn parse_listings(payload: &Value) -> Result<Vec<RawListing>, ProviderFailure> {
        let rows = extract::first_array(payload, LISTING_PATHS).ok_or_else(|| {
            ProviderFailure::malformed(PROVIDER_NAME, "expected an array of listings")
        })?;

        Ok(rows.iter().map(Self::parse_row).collect())
    }

    fn parse_row(row: &Value) -> RawListing {
        let cents = row.get("price").and_then(extract::decimal_from_value);
        let item = row.get("item").unwrap_or(row);

        let mut listing = RawListing::new(cents, PriceUnit::Minor, USD);
        listing.name = extract::first_str(item, keys::NAME);
        listing.wear = extract::first_str(item, keys::WEAR);
        listing.image_url = extract::first_str(item, keys::IMAGE).map(expand_icon_url);
        listing.float_value = extract::first_f64(item, keys::FLOAT);
        listing.pattern_index = extract::first_i64(item, keys::PATTERN);
        listing
    }
}

fn expand_icon_url(icon: String) -> String {
    if icon.starts_with("http://") || icon.starts_with("https://") {
        icon
    } else {
        format!("{}{}", STEAM_IMAGE_CDN, icon)
    }
}

#[async_trait]
impl PriceProvider for CsFloatProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn priority(&self) -> u8 {
        1
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::direct(SourceMethod::Api)
            .with_marketplace(MARKETPLACE)
            .with_credential()
    }

    async fn fetch_listings(&self, key: &SearchKey) -> Result<Vec<RawListing>, ProviderFailure> {
        let url = format!("{}/api/v1/listings", self.base_url);
        let market_hash_name = key.market_hash_name();
        debug!("CSFloat request: {} for '{}'", url, market_hash_name);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[("market_hash_name", market_hash_name.as_str()), ("limit", PAGE_LIMIT)])
            .send()
            .await
            .map_err(|e| transport_failure(PROVIDER_NAME, &e))?;

        let payload = read_json(PROVIDER_NAME, response).await?;
        let listings = Self::parse_listings(&payload)?;
        if listings.is_empty() {
            return Err(ProviderFailure::empty(
                PROVIDER_NAME,
                format!("No listings found for: {}", market_hash_name),
            ));
        }

        debug!("CSFloat returned {} listings", listings.len());
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FailureReason;
    use crate::models::Wear;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn listing_json(cents: i64, wear: &str) -> Value {
        json!({
            "id": "1",
            "price": cents,
            "item": {
                "market_hash_name": "AK-47 | Redline (Field-Tested)",
                "wear_name": wear,
                "icon_url": "abc123",
                "float_value": 0.2512,
                "paint_seed": 321
            }
        })
    }

    #[test]
    fn test_parse_bare_array() {
        let payload = json!([listing_json(1250, "Field-Tested")]);
        let listings = CsFloatProvider::parse_listings(&payload).unwrap();

        assert_eq!(listings.len(), 1);
        let listing = &listings[0];
        assert_eq!(listing.amount, Some(dec!(1250)));
        assert_eq!(listing.unit, PriceUnit::Minor);
        assert_eq!(listing.usd_price(), Some(dec!(12.50)));
        assert_eq!(listing.wear.as_deref(), Some("Field-Tested"));
        assert_eq!(
            listing.image_url.as_deref(),
            Some("https://steamcommunity-a.akamaihd.net/economy/image/abc123")
        );
        assert_eq!(listing.float_value, Some(0.2512));
        assert_eq!(listing.pattern_index, Some(321));
    }

    #[test]
    fn test_parse_data_envelope() {
        let payload = json!({ "data": [listing_json(100, "Factory New"), listing_json(200, "Factory New")] });
        assert_eq!(CsFloatProvider::parse_listings(&payload).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let failure = CsFloatProvider::parse_listings(&json!({ "message": "nope" })).unwrap_err();
        assert_eq!(failure.reason, FailureReason::MalformedData);
    }

    #[tokio::test]
    async fn test_fetch_sends_key_and_query() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/listings"))
            .and(header("Authorization", "test_key"))
            .and(query_param("market_hash_name", "AK-47 Redline"))
            .and(query_param("limit", "50"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([listing_json(999, "Field-Tested")])),
            )
            .mount(&mock_server)
            .await;

        let provider = CsFloatProvider::with_base_url("test_key".to_string(), mock_server.uri());
        let listings = provider
            .fetch_listings(&SearchKey::new("AK-47 Redline"))
            .await
            .unwrap();
        assert_eq!(listings[0].usd_price(), Some(dec!(9.99)));
    }

    #[tokio::test]
    async fn test_fetch_sends_qualifier_in_market_hash_name() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/listings"))
            .and(query_param("market_hash_name", "AK-47 Redline (Field-Tested)"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([listing_json(1250, "Field-Tested")])),
            )
            .mount(&mock_server)
            .await;

        let provider = CsFloatProvider::with_base_url("test_key".to_string(), mock_server.uri());
        let key = SearchKey::new("AK-47 Redline").with_qualifier(Wear::FieldTested);
        let listings = provider.fetch_listings(&key).await.unwrap();
        assert_eq!(listings[0].usd_price(), Some(dec!(12.50)));
    }

    #[tokio::test]
    async fn test_fetch_maps_statuses() {
        let cases = [
            (401, FailureReason::AuthError),
            (403, FailureReason::AuthError),
            (429, FailureReason::RateLimited),
            (500, FailureReason::Unknown),
        ];

        for (status, expected) in cases {
            let mock_server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status).set_body_string("denied"))
                .mount(&mock_server)
                .await;

            let provider = CsFloatProvider::with_base_url("k".to_string(), mock_server.uri());
            let failure = provider
                .fetch_listings(&SearchKey::new("AWP Asiimov"))
                .await
                .unwrap_err();
            assert_eq!(failure.reason, expected, "status {}", status);
            assert_eq!(failure.provider, "CSFloat");
        }
    }

    #[tokio::test]
    async fn test_fetch_empty_and_malformed() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("market_hash_name", "Empty"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("market_hash_name", "Broken"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let provider = CsFloatProvider::with_base_url("k".to_string(), mock_server.uri());
        let empty = provider.fetch_listings(&SearchKey::new("Empty")).await.unwrap_err();
        assert_eq!(empty.reason, FailureReason::EmptyResult);

        let broken = provider.fetch_listings(&SearchKey::new("Broken")).await.unwrap_err();
        assert_eq!(broken.reason, FailureReason::MalformedData);
    }
}
