//! Price resolution: provider configuration, the provider chain, and the
//! service the HTTP layer calls.

mod client;
mod config;
mod pricing_service;
mod pricing_traits;

pub use client::PriceClient;
pub use config::{ProviderConfig, ProviderSelector};
pub use pricing_service::PriceService;
pub use pricing_traits::PriceServiceTrait;
