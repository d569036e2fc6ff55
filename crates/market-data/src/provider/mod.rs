//! Price provider abstractions and implementations.
//!
//! This module contains:
//! - The `PriceProvider` trait that all providers implement
//! - Provider capabilities (direct query vs. async job, provenance)
//! - Shared HTTP status mapping and the poll-loop clock
//! - Concrete providers (CSFloat, Apify actor, Steam, web scraper targets)
//!
//! Providers only fetch and extract. They receive a derived
//! [`SearchKey`](crate::models::SearchKey) and return raw listings; median
//! and metadata selection happen in the reconciler.

mod capabilities;
mod clock;
pub mod http;
mod traits;

pub mod apify_actor;
pub mod csfloat;
pub mod steam;
pub mod web_scraper;

// Re-exports
pub use capabilities::{ProviderCapabilities, ProviderKind};
pub use clock::{Clock, TokioClock};
pub use traits::PriceProvider;
