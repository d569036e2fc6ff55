//! Market data models
//!
//! This module contains the core data types for price resolution:
//! - `types` - Type aliases and fixed literals (ProviderId, Currency, USD, SCHEMA_VERSION)
//! - `wear` - Cosmetic condition tiers (Wear)
//! - `search_key` - Provider-agnostic search key (SearchKey)
//! - `listing` - Raw provider listings before reconciliation (RawListing, PriceUnit)
//! - `quote` - The reconciled quote and its request context (PriceQuote, QuoteContext)

mod listing;
mod quote;
mod search_key;
mod types;
mod wear;

pub use listing::{PriceUnit, RawListing};
pub use quote::{
    Attribute, AttributeValue, DisplayType, PriceQuote, Provenance, QuoteContext, SourceMethod,
};
pub use search_key::SearchKey;
pub use types::{Currency, ProviderId, SCHEMA_VERSION, USD};
pub use wear::Wear;
