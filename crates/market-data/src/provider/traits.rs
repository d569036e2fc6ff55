//! Price provider trait definitions.
//!
//! This module defines the core `PriceProvider` trait that every listing
//! source implements.

use async_trait::async_trait;

use crate::errors::ProviderFailure;
use crate::models::{RawListing, SearchKey};

use super::capabilities::ProviderCapabilities;

/// Trait for price providers.
///
/// Implement this trait to add support for a new listing source. The
/// registry orders providers by priority and hands each provider's listings
/// to the reconciler, so a provider only has to fetch and extract.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use skinprice_market_data::provider::{PriceProvider, ProviderCapabilities};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl PriceProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     fn name(&self) -> &str {
///         "Fixed"
///     }
///
///     fn capabilities(&self) -> ProviderCapabilities {
///         ProviderCapabilities::direct(SourceMethod::Api)
///     }
///
///     async fn fetch_listings(&self, key: &SearchKey) -> Result<Vec<RawListing>, ProviderFailure> {
///         Ok(vec![RawListing::usd(dec!(10))])
///     }
/// }
/// ```
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "CSFLOAT", "BUFF163", etc.
    /// Used for logging and priority overrides.
    fn id(&self) -> &'static str;

    /// Display name, reported as `source.provider` and in failure messages.
    fn name(&self) -> &str;

    /// Provider priority for ordering.
    ///
    /// Lower values = higher priority. Default is 10.
    fn priority(&self) -> u8 {
        10
    }

    /// Describes how this provider fetches and what it reports as provenance.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Fetch raw listings for a search key.
    ///
    /// Listings must already be in USD unless the provider's source is
    /// quoted in another currency and converted here. An empty vector is
    /// allowed; the reconciler turns it into an `EmptyResult` failure.
    async fn fetch_listings(&self, key: &SearchKey) -> Result<Vec<RawListing>, ProviderFailure>;
}
