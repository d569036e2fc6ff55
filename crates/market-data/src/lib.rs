//! Skinprice Market Data Crate
//!
//! This crate turns a catalog item into a live market price by asking
//! external marketplaces in turn until one of them answers.
//!
//! # Overview
//!
//! The market data crate supports:
//! - Search key derivation from catalog identifiers
//! - Multiple providers: CSFloat, Apify actors, Steam, scraped marketplaces
//! - Median reconciliation of raw listings into one quote
//! - Ordered fallback with per-attempt deadlines
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Catalog item   | --> |    SearchKey     |  (resolver)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | ProviderRegistry |  (ordered fallback)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  PriceProvider   |  (CSFloat, Apify, Steam, ...)
//!                          +------------------+
//!                                  |  Vec<RawListing>
//!                                  v
//!                          +------------------+
//!                          |   Reconciler     |  (median + representative)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   PriceQuote     |
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`SearchKey`] - Provider-agnostic search term and wear qualifier
//! - [`RawListing`] - One marketplace listing as a provider reported it
//! - [`PriceQuote`] - Reconciled price with provenance and attributes
//! - [`QuoteContext`] - Request context with catalog defaults
//! - [`ProviderFailure`] - Typed failure of a single provider attempt

pub mod errors;
pub mod models;
pub mod provider;
pub mod reconciler;
pub mod registry;
pub mod resolver;

// Re-export all public types from models
pub use models::{
    Attribute, AttributeValue, Currency, DisplayType, PriceQuote, PriceUnit, Provenance,
    ProviderId, QuoteContext, RawListing, SearchKey, SourceMethod, Wear, SCHEMA_VERSION, USD,
};

// Re-export error types
pub use errors::{FailureReason, MarketDataError, ProviderFailure};

// Re-export resolver types
pub use resolver::{derive_search_key, MELEE_GLYPH, STAT_TRAK_PREFIX};

// Re-export provider types
pub use provider::apify_actor::ApifyActorProvider;
pub use provider::csfloat::CsFloatProvider;
pub use provider::steam::SteamMarketProvider;
pub use provider::web_scraper::{PollPolicy, ScrapeTarget, WebScraperProvider, BUFF163, STEAMDT};
pub use provider::{Clock, PriceProvider, ProviderCapabilities, ProviderKind, TokioClock};

pub use reconciler::reconcile;

// Re-export registry types
pub use registry::{FetchDiagnostics, ProviderAttempt, ProviderRegistry, DEFAULT_ATTEMPT_TIMEOUT};
