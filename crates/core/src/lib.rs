//! Skinprice Core - catalog and price resolution services.
//!
//! This crate owns the curated item catalog and composes it with the
//! market-data crate's provider chain. It holds no mutable shared state.

pub mod catalog;
pub mod errors;
pub mod pricing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
